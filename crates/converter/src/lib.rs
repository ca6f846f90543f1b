mod convert;
mod match_specifiers;
mod satisfies;
mod translate;

pub use convert::{
    convert, convert_dedicated, load_lockfile, write, ConvertError, WriteRecursive,
};
pub use match_specifiers::{
    match_specifiers, DeclaredDependency, MatchSpecifiersError, PackageWithSpecifiers,
};
pub use satisfies::satisfies;
pub use translate::{TranslateError, Translator, TranslatorConfig};
