use super::*;

#[test]
fn test_threshold_filters_levels() {
    let logger = Logger::new().with_min_level(Some(LogLevel::Warning));
    assert!(!logger.enabled(LogLevel::Debug));
    assert!(!logger.enabled(LogLevel::Success));
    assert!(logger.enabled(LogLevel::Warning));
    assert!(logger.enabled(LogLevel::Error));

    assert!(!Logger::silent().enabled(LogLevel::Error));
}

#[test]
fn test_parse_filter() {
    assert_eq!(LogLevel::parse_filter("DEBUG"), Ok(Some(LogLevel::Debug)));
    assert_eq!(LogLevel::parse_filter(" warn "), Ok(Some(LogLevel::Warning)));
    assert_eq!(LogLevel::parse_filter("off"), Ok(None));
    assert!(LogLevel::parse_filter("loud").is_err());
}

#[test]
fn test_plain_line_format() {
    assert_eq!(
        render_plain_line(LogLevel::Error, "boom"),
        "[musmcp] [ERROR] boom"
    );
}

#[test]
fn test_file_records_even_when_silent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("musmcp.log");
    let logger = Logger::silent().with_file(LogWriter::new(&path));

    logger.action("rendering");
    logger.log_with_details(LogLevel::Error, "render failed", ["exit code 1"]);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("[ACTION] rendering"));
    assert!(lines[1].ends_with("[ERROR] render failed"));
    assert!(lines[2].ends_with("[ERROR]   exit code 1"));
}
