//! Tests for candidate loading progress tracking

#[cfg(test)]
mod tests {
    use photomosaic::io::progress::ProgressReporter;
    use std::path::Path;

    // Tests hidden reporters still count progress
    // Verified by skipping increments when hidden
    #[test]
    fn test_hidden_reporter_counts() {
        let reporter = ProgressReporter::hidden();
        reporter.set_total(3);
        reporter.advance(Path::new("tiles/a.png"));
        reporter.advance(Path::new("tiles/b.png"));

        assert_eq!(reporter.position(), 2);
        assert_eq!(reporter.total(), Some(3));
        reporter.finish(2);
    }

    // Tests visible reporters accept the full lifecycle
    // Verified by panicking on an invalid template
    #[test]
    fn test_visible_reporter_lifecycle() {
        let reporter = ProgressReporter::new("Reading tiles");
        reporter.set_total(1);
        reporter.advance(Path::new("only.png"));
        reporter.finish(1);

        assert_eq!(reporter.position(), 1);
    }
}
