//! Command line utility that translates a file from/to MLIR using one of the
//! registered translations.

use anyhow::Result;
use graphblas::register_all_translations;
use graphblas::translate_main;
use graphblas::TranslationRegistry;
use std::ffi::OsString;
use std::process::ExitCode;

const DESCRIPTION: &str = "MLIR Translation Testing Tool";

fn registry() -> Result<TranslationRegistry> {
    let mut registry = TranslationRegistry::new();
    register_all_translations(&mut registry)?;

    // TODO: Register graphblas translations here once the dialect declares
    // operations in `graphblas::ops::OPERATIONS`.

    Ok(registry)
}

fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let registry = registry()?;
    translate_main(&registry, args, DESCRIPTION)
}

fn main() -> ExitCode {
    match run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(err) = err.downcast_ref::<clap::Error>() {
                err.exit();
            }
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help() {
        let args = vec!["graphblas-translate", "--help"];
        let err = match run(args) {
            Ok(_) => panic!("Expected an error"),
            Err(e) => e,
        };
        let err = err.to_string();
        assert!(err.contains("Usage: graphblas-translate"));
        assert!(err.contains("MLIR Translation Testing Tool"));
        assert!(err.contains("--mlir-to-llvmir"));
        assert!(err.contains("--mlir-to-mlir"));
    }

    #[test]
    fn test_invalid_args() {
        let args = vec!["graphblas-translate", "--invalid-flag"];
        let err = run(args).unwrap_err();
        assert!(err.downcast_ref::<clap::Error>().is_some());
    }

    #[test]
    fn test_missing_input() {
        let args = vec![
            "graphblas-translate",
            "--mlir-to-mlir",
            "does-not-exist.mlir",
        ];
        let err = run(args).unwrap_err();
        assert!(err.downcast_ref::<clap::Error>().is_none());
        assert!(format!("{err:#}").contains("does-not-exist.mlir"));
    }
}
