use crate::{match_specifiers, satisfies, MatchSpecifiersError, PackageWithSpecifiers};
use derive_more::{Display, Error};
use itertools::Itertools;
use lock_export_diagnostics::miette::{self, Diagnostic};
use lock_export_lockfile::{
    describe, ComVer, DependencyReference, DescribeError, Lockfile, PackageDescription,
};
use lock_export_npmrc::{Npmrc, Registries};
use lock_export_yarn_lockfile::{FlatPackageRecord, YarnLock, YarnLockEntry};
use std::iter;

/// Settings of a [`Translator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Newest `lockfileVersion` known to translate correctly. Newer ones only produce a warning.
    pub latest_supported_version: ComVer,
    /// Registries used to compute the `resolved` field of registry packages.
    pub registries: Registries,
}

impl TranslatorConfig {
    pub const LATEST_SUPPORTED_VERSION: ComVer = ComVer::new(6, 0);

    /// Use the registries configured in `.npmrc`.
    pub fn from_npmrc(npmrc: Npmrc) -> Self {
        TranslatorConfig { registries: npmrc.registries, ..TranslatorConfig::default() }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            latest_supported_version: TranslatorConfig::LATEST_SUPPORTED_VERSION,
            registries: Registries::default(),
        }
    }
}

/// Error type of [`Translator::translate`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum TranslateError {
    #[diagnostic(transparent)]
    MatchSpecifiers(#[error(source)] MatchSpecifiersError),

    #[diagnostic(transparent)]
    Describe(#[error(source)] DescribeError),
}

/// Translates pnpm lockfiles into yarn v1 lockfiles.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Translator { config }
    }

    pub fn config(&self) -> &'_ TranslatorConfig {
        &self.config
    }

    /// Whether lockfiles of `version` are known to translate correctly.
    pub fn supports(&self, version: ComVer) -> bool {
        version <= self.config.latest_supported_version
    }

    /// Produce one yarn entry per package of `lockfile`, in the order of its `packages` map.
    pub fn translate(&self, lockfile: &Lockfile) -> Result<YarnLock, TranslateError> {
        if !self.supports(lockfile.lockfile_version) {
            tracing::warn!(
                target: "lock_export::translate",
                "Your lockfile version ({}) is higher than the supported version of pnpm-lock-export ({})",
                lockfile.lockfile_version,
                self.config.latest_supported_version,
            );
        }

        match_specifiers(lockfile)
            .map_err(TranslateError::MatchSpecifiers)?
            .into_iter()
            .map(|package| self.translate_package(package))
            .collect()
    }

    fn translate_package(
        &self,
        package: PackageWithSpecifiers<'_>,
    ) -> Result<YarnLockEntry, TranslateError> {
        let PackageWithSpecifiers { dependency_path, snapshot, matching_dependencies } = package;
        let PackageDescription { name, version, resolved, integrity } =
            describe(dependency_path, snapshot, &self.config.registries)
                .map_err(TranslateError::Describe)?;

        let dependencies = snapshot.dependencies.as_ref().map(|dependencies| {
            dependencies
                .iter()
                .map(|(name, reference)| (name.clone(), flat_version(reference).to_string()))
                .collect()
        });

        let specifiers = matching_dependencies
            .iter()
            .filter(|dependency| dependency.name == name)
            .map(|dependency| dependency.specifier)
            .filter(|specifier| {
                let matched = satisfies(&version, specifier);
                if !matched {
                    tracing::debug!(target: "lock_export::translate", %name, %version, %specifier, "Skip unsatisfied specifier");
                }
                matched
            })
            .chain(iter::once(version.as_str()))
            .unique()
            .map(|specifier| format!("{name}@{specifier}"))
            .collect();

        Ok(YarnLockEntry {
            specifiers,
            record: FlatPackageRecord { version, resolved, integrity, dependencies },
        })
    }
}

/// Version of a dependency as written in `yarn.lock`.
fn flat_version(reference: &str) -> &'_ str {
    match DependencyReference::parse(reference).without_peers_suffix() {
        "" => reference,
        version => version,
    }
}
