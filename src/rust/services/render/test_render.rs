use super::*;

#[test]
fn test_output_name_gets_extension_once() {
    let base = Path::new("/work");
    assert_eq!(resolve_output_path("kick", base), PathBuf::from("/work/kick.wav"));
    assert_eq!(resolve_output_path("kick.wav", base), PathBuf::from("/work/kick.wav"));
    assert_eq!(
        resolve_output_path("pads/warm.pad", base),
        PathBuf::from("/work/pads/warm.pad.wav")
    );
}

#[test]
fn test_absolute_output_name_ignores_base() {
    assert_eq!(
        resolve_output_path("/tmp/out.wav", Path::new("/work")),
        PathBuf::from("/tmp/out.wav")
    );
}

#[test]
fn test_engine_args_order() {
    let args = engine_args(Path::new("/o/a.wav"), Path::new("/t/s.csd"));
    assert_eq!(args, vec!["-d", "-W", "-o", "/o/a.wav", "/t/s.csd"]);
}

#[test]
fn test_error_text_and_kind() {
    let err = RenderError::Engine {
        code: Some(1),
        stdout: "out".into(),
        stderr: "syntax error".into(),
    };
    assert_eq!(err.kind(), FailureKind::Engine);
    assert_eq!(err.to_string(), "Error rendering CSD:\nSTDOUT:\nout\nSTDERR:\nsyntax error");

    let launch = RenderError::Launch("csound: not found".into());
    assert_eq!(launch.kind(), FailureKind::Launch);
    assert_eq!(flatten(&Err(launch)), "Failed to execute Csound: csound: not found");
    assert_eq!(flatten(&Ok(PathBuf::from("/a/b.wav"))), "/a/b.wav");
}

#[tokio::test]
async fn test_missing_engine_is_launch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let settings = EngineSettings {
        binary: dir.path().join("no-such-csound"),
        timeout: Duration::from_secs(5),
    };
    let renderer = Renderer::new(settings, Arc::new(Logger::silent()))
        .with_temp_dir(Some(dir.path().to_path_buf()));

    let err = renderer.render("<CsoundSynthesizer/>", None).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Launch);
    assert!(err.to_string().starts_with("Failed to execute Csound: "));
}

#[tokio::test]
async fn test_unwritable_temp_dir_is_launch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let settings = EngineSettings {
        binary: dir.path().join("no-such-csound"),
        timeout: Duration::from_secs(5),
    };
    let renderer = Renderer::new(settings, Arc::new(Logger::silent()))
        .with_temp_dir(Some(dir.path().join("missing").join("tmp")));

    let err = renderer.render("<CsoundSynthesizer/>", None).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Launch);
    assert!(
        err.to_string().starts_with("Failed to execute Csound: creating temp script: "),
        "{err}"
    );
}

#[cfg(unix)]
mod fake_engine {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Shell script standing in for csound; `$4` is the output, `$5` the script.
    fn install(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-csound");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn renderer(dir: &Path, body: &str, timeout: Duration) -> Renderer {
        let settings = EngineSettings {
            binary: install(dir, body),
            timeout,
        };
        Renderer::new(settings, Arc::new(Logger::silent()))
            .with_temp_dir(Some(dir.to_path_buf()))
            .with_output_dir(Some(dir.to_path_buf()))
    }

    #[tokio::test]
    async fn test_success_returns_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer(dir.path(), "cp \"$5\" \"$4\"", Duration::from_secs(10));

        let script = "<CsoundSynthesizer>\ni 1 0 1.0\n</CsoundSynthesizer>";
        let path = renderer.render(script, Some("tone")).await.unwrap();

        assert!(path.is_absolute());
        assert_eq!(path, dir.path().join("tone.wav"));
        // the fake engine copies the script verbatim into the output
        assert_eq!(std::fs::read_to_string(&path).unwrap(), script);
    }

    #[tokio::test]
    async fn test_engine_receives_fixed_flags() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer(
            dir.path(),
            "printf '%s\\n' \"$@\" > \"$4\"",
            Duration::from_secs(10),
        );

        let path = renderer.render("x", Some("args.wav")).await.unwrap();
        let argv = std::fs::read_to_string(&path).unwrap();
        let argv: Vec<&str> = argv.lines().collect();

        assert_eq!(argv.len(), 5);
        assert_eq!(&argv[..3], &["-d", "-W", "-o"]);
        assert_eq!(argv[3], path.display().to_string());
        assert!(argv[4].ends_with(".csd"));
        assert!(Path::new(argv[4]).exists());
    }

    #[tokio::test]
    async fn test_unnamed_renders_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer(dir.path(), "printf 'RIFF' > \"$4\"", Duration::from_secs(10));

        let first = renderer.render("a", None).await.unwrap();
        let second = renderer.render("a", None).await.unwrap();

        assert_ne!(first, second);
        assert!(first.extension().is_some_and(|e| e == "wav"));
        assert!(first.exists());
        assert!(second.exists());
    }

    #[tokio::test]
    async fn test_nonzero_exit_embeds_both_streams() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer(
            dir.path(),
            "echo 'parsing orchestra'\necho 'syntax error' >&2\nexit 1",
            Duration::from_secs(10),
        );

        let err = renderer.render("broken", None).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Engine);

        let text = err.to_string();
        assert!(text.contains("STDOUT:\nparsing orchestra"));
        assert!(text.contains("STDERR:"));
        assert!(text.contains("syntax error"));
        match err {
            RenderError::Engine { code, .. } => assert_eq!(code, Some(1)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hung_engine_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer(dir.path(), "exec sleep 30", Duration::from_millis(200));

        let started = Instant::now();
        let err = renderer.render("x", None).await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::Timeout);
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
