//! Enforces the one-to-one mirror between `src/` and `tests/unit/`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const TESTS_DIR: &str = "tests";

    // Binary and library roots carry no logic of their own
    const SRC_ROOTS: &[&str] = &["lib.rs", "main.rs"];

    // Each directory under tests/ compiles as its own test crate from main.rs
    const TEST_CRATE_ROOTS: &[&str] = &["tests/unit/main.rs", "tests/meta/main.rs"];

    fn rust_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                files.extend(rust_files(&path)?);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn is_module_file(path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == "mod.rs")
    }

    fn is_test_crate_root(path: &Path) -> bool {
        TEST_CRATE_ROOTS.iter().any(|root| path == Path::new(root))
    }

    // Source files that need a unit test file, relative to src/
    fn source_modules() -> BTreeSet<PathBuf> {
        rust_files(Path::new(SRC_DIR))
            .unwrap()
            .into_iter()
            .filter(|path| !is_module_file(path))
            .filter_map(|path| path.strip_prefix(SRC_DIR).map(Path::to_path_buf).ok())
            .filter(|relative| !SRC_ROOTS.iter().any(|root| relative == Path::new(root)))
            .collect()
    }

    // Unit test files, relative to tests/unit/
    fn unit_test_modules() -> BTreeSet<PathBuf> {
        rust_files(Path::new(UNIT_DIR))
            .unwrap()
            .into_iter()
            .filter(|path| !is_module_file(path) && !is_test_crate_root(path))
            .filter_map(|path| path.strip_prefix(UNIT_DIR).map(Path::to_path_buf).ok())
            .collect()
    }

    fn listing(paths: &[PathBuf], prefix: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {prefix}/{}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests every source file has a unit test file at the mirrored path
    // Verified by adding a source file without a test counterpart
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let tests = unit_test_modules();
        let missing: Vec<_> = source_modules()
            .iter()
            .filter(|path| !tests.contains(*path))
            .cloned()
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without a tests/unit counterpart:\n{}",
            listing(&missing, SRC_DIR)
        );
    }

    // Tests every unit test file mirrors an existing source file
    // Verified by leaving a test file behind after deleting its source
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = source_modules();
        let orphaned: Vec<_> = unit_test_modules()
            .iter()
            .filter(|path| !sources.contains(*path))
            .cloned()
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a src counterpart:\n{}",
            listing(&orphaned, UNIT_DIR)
        );
    }

    // Tests every top-level library module is compiled into the unit test crate
    // Verified by dropping a module declaration from tests/unit/main.rs
    #[test]
    fn test_unit_crate_declares_library_modules() {
        let library = fs::read_to_string(Path::new(SRC_DIR).join("lib.rs")).unwrap();
        let unit_root = fs::read_to_string(Path::new(UNIT_DIR).join("main.rs")).unwrap();

        let undeclared: Vec<_> = library
            .lines()
            .filter_map(|line| line.trim().strip_prefix("pub mod "))
            .filter_map(|rest| rest.strip_suffix(';'))
            .filter(|module| !unit_root.contains(&format!("mod {module};")))
            .collect();

        assert!(
            undeclared.is_empty(),
            "Library modules missing from tests/unit/main.rs: {undeclared:?}"
        );
    }

    // Tests every test file outside module and crate roots defines a test
    // Verified by adding a test file with helpers only
    #[test]
    fn test_all_test_files_contain_tests() {
        let without_tests: Vec<_> = rust_files(Path::new(TESTS_DIR))
            .unwrap()
            .into_iter()
            .filter(|path| !is_module_file(path) && !is_test_crate_root(path))
            .filter(|path| {
                fs::read_to_string(path).is_ok_and(|content| !content.contains("#[test]"))
            })
            .collect();

        assert!(
            without_tests.is_empty(),
            "Test files without any #[test] function:\n{}",
            without_tests
                .iter()
                .map(|path| format!("  - {}", path.display()))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}
