//! Common utils for integration tests
//!
//!

use error_stack::Result;
use fileset::*;
use murmur3::murmur3_32;
use std::{
    io::BufReader,
    path::{Path, PathBuf},
};

pub struct TestEnv {
    config: Config,
    test_description: String,
    test_dir: PathBuf,
}

impl TestEnv {
    pub fn new(test_name_raw: &str) -> Self {
        let test_description = test_name_raw.to_string();
        let mut read = BufReader::new(test_description.as_bytes());
        let test_name = format!(
            "test-{}",
            murmur3_32(&mut read, test_description.len().try_into().unwrap()).unwrap()
        );
        // create test directory
        let root_path = Path::new("target/test_out");
        if !root_path.exists() {
            std::fs::create_dir_all(root_path).unwrap();
        }
        let path = root_path.join(test_name);
        if path.exists() {
            std::fs::remove_dir_all(&path).unwrap();
        }
        std::fs::create_dir_all(&path).unwrap();

        let mut config = Config::default();
        config.num_threads = 1;
        config.verbosity = Verbosity::Quiet;
        config.base_dir = path.clone();

        Self {
            test_description,
            test_dir: path,
            config,
        }
    }

    #[inline]
    pub fn execute<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        f(self)
    }

    #[inline]
    pub fn cfg(&mut self) -> &mut Config {
        &mut self.config
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.test_dir
    }

    #[inline]
    pub fn resolve<I>(&self, input: I) -> Result<Vec<Resource>, ResolveError>
    where
        I: Into<Input>,
    {
        Resolver::run(input, self.config.clone())
    }

    #[inline]
    pub fn resolve_read<I>(&self, input: I) -> Result<Vec<Resource>, ResolveError>
    where
        I: Into<Input>,
    {
        fileset::resolve_read(input, self.config.clone())
    }

    #[inline]
    pub fn set_file(&self, file_name: &str, contents: &str) {
        let path = self.test_dir.join(file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
    }

    #[inline]
    pub fn make_dir(&self, dir_name: &str) {
        std::fs::create_dir_all(self.test_dir.join(dir_name)).unwrap();
    }

    #[inline]
    pub fn delete_file(&self, file_name: &str) {
        let path = self.test_dir.join(file_name);
        std::fs::remove_file(&path).unwrap();
    }

    pub fn assert_file_eq(&self, file_name: &str, expected_contents: &str) {
        let actual_path = self.test_dir.join(file_name);
        assert!(
            actual_path.exists(),
            "expected output file `{}` does not exist in test `{}` ({})",
            file_name,
            self.test_description,
            self.test_dir.display()
        );
        let actual = std::fs::read_to_string(actual_path).unwrap();
        assert_eq!(
            actual,
            expected_contents,
            "file comparison failed in test `{}` ({})",
            self.test_description,
            self.test_dir.display()
        );
    }

    #[inline]
    pub fn assert_path_exists(&self, path_name: &str, exists: bool) {
        assert_eq!(
            exists,
            self.test_dir.join(path_name).exists(),
            "file existence test failed in test `{}` ({})",
            self.test_description,
            self.test_dir.display()
        );
    }

    pub fn assert_dests(&self, resources: &[Resource], expected: &[&str]) {
        let dests = resources.iter().map(|r| r.dest()).collect::<Vec<_>>();
        let expected = expected
            .iter()
            .map(|d| Some(PathBuf::from(d)))
            .collect::<Vec<_>>();
        assert_eq!(
            dests,
            expected,
            "destination comparison failed in test `{}` ({})",
            self.test_description,
            self.test_dir.display()
        );
    }
}

macro_rules! testit {
    ($test_name:ident, $fnonce:expr) => {
        #[test]
        #[allow(non_snake_case)]
        fn $test_name() {
            let mut env = TestEnv::new(stringify!($test_name));
            env.execute($fnonce);
        }
    };
}

pub(crate) use testit;
