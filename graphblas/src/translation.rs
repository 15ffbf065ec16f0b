use crate::dialect::GraphBLAS;
use anyhow::Result;
use clap::Arg;
use clap::ArgAction;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use xrcf::convert::RewriteResult;
use xrcf::parser::DefaultParserDispatch;
use xrcf::parser::Parser;
use xrcf::transform;
use xrcf::DefaultTransformDispatch;
use xrcf::Passes;
use xrcf::TransformOptions;

/// Function that translates source text into output text.
pub type TranslateFn = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// Names that are taken by the options of the translation driver.
const RESERVED: &[&str] = &[
    "input",
    "output",
    "split-input-file",
    "split_input_file",
    "debug",
    "help",
    "version",
    "translation",
];

/// A named translation (e.g., `--mlir-to-llvmir`).
pub struct Translation {
    name: &'static str,
    description: &'static str,
    function: TranslateFn,
}

impl Translation {
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn description(&self) -> &'static str {
        self.description
    }
    pub fn run(&self, src: &str) -> Result<String> {
        (self.function)(src)
    }
}

impl Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.name)
    }
}

/// The set of translations that a translation tool knows about.
///
/// Translations are kept sorted by name so that `--help` lists them in a
/// stable order.
#[derive(Default)]
pub struct TranslationRegistry {
    translations: BTreeMap<&'static str, Translation>,
}

impl TranslationRegistry {
    pub fn new() -> TranslationRegistry {
        TranslationRegistry::default()
    }
    /// Register a translation under `name`.
    ///
    /// Fails if the name is already taken, either by another translation or
    /// by one of the options of the driver.
    pub fn register<F>(
        &mut self,
        name: &'static str,
        description: &'static str,
        function: F,
    ) -> Result<()>
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        if name.is_empty() || name.starts_with('-') {
            return Err(anyhow::anyhow!("Invalid translation name: \"{name}\""));
        }
        if RESERVED.contains(&name) {
            return Err(anyhow::anyhow!(
                "Translation name \"{name}\" clashes with a driver option"
            ));
        }
        if self.translations.contains_key(name) {
            return Err(anyhow::anyhow!(
                "Attempting to overwrite an existing translation: {name}"
            ));
        }
        tracing::debug!("Registering translation --{name}");
        let translation = Translation {
            name,
            description,
            function: Box::new(function),
        };
        self.translations.insert(name, translation);
        Ok(())
    }
    pub fn get(&self, name: &str) -> Option<&Translation> {
        self.translations.get(name)
    }
    pub fn names(&self) -> Vec<&'static str> {
        self.translations.keys().copied().collect()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Translation> {
        self.translations.values()
    }
    pub fn len(&self) -> usize {
        self.translations.len()
    }
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
    /// Command line flags for the registered translations.
    pub fn arguments(&self) -> Vec<Arg> {
        self.iter()
            .map(|translation| {
                Arg::new(translation.name)
                    .long(translation.name)
                    .help(translation.description)
                    .action(ArgAction::SetTrue)
            })
            .collect()
    }
}

/// Whether `src` holds nothing but whitespace and line comments.
pub(crate) fn is_blank(src: &str) -> bool {
    src.lines()
        .map(|line| line.trim())
        .all(|line| line.is_empty() || line.starts_with("//"))
}

/// Parse `src` with the xrcf parser, run `passes`, and print the result.
///
/// Operations from the graphblas dialect are checked before parsing so that
/// undeclared operations are reported as such instead of as parse errors.
fn parse_and_transform(src: &str, passes: Vec<&str>) -> Result<String> {
    if is_blank(src) {
        return Err(anyhow::anyhow!("Input does not contain any operations"));
    }
    GraphBLAS::verify_source(src)?;
    let module = Parser::<DefaultParserDispatch>::parse(src)?;
    tracing::debug!("Running passes: {passes:?}");
    let options = TransformOptions::from_passes(Passes::from_convert_vec(passes));
    let result = transform::<DefaultTransformDispatch>(module.clone(), &options)?;
    let op = match result {
        RewriteResult::Changed(changed) => changed.op,
        RewriteResult::Unchanged => module,
    };
    let text = op.try_read().into_iter().next().map(|op| op.to_string());
    text.ok_or_else(|| anyhow::anyhow!("Failed to read the translated module"))
}

/// Register the translations that are provided by xrcf.
pub fn register_all_translations(registry: &mut TranslationRegistry) -> Result<()> {
    registry.register("mlir-to-llvmir", "Translate MLIR to LLVMIR", |src| {
        parse_and_transform(src, vec!["--convert-func-to-llvm", "--convert-mlir-to-llvmir"])
    })?;
    registry.register(
        "mlir-to-mlir",
        "Parse MLIR and print it back (round trip)",
        |src| parse_and_transform(src, vec![]),
    )?;
    Ok(())
}
