//! The `import` command.

use std::io;
use std::path::PathBuf;

use crate::bulk::{Applier, DryRunApplier, RestApplier};
use crate::cli::args::ImportArgs;
use crate::cluster::ClusterClient;
use crate::config::{load_cluster_config, ClusterConfig};
use crate::error::{ImportError, Result};
use crate::generate::AppJsonGenerator;
use crate::import::{Collaborators, ImportOptions, Importer};
use crate::process::{LocalProcessor, RemoteProcessor, TemplateProcessor};
use crate::scheme::{Scheme, SchemeCheck};
use crate::source::HttpFetcher;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The import command implementation.
pub struct ImportCommand {
    args: ImportArgs,
    config_path: Option<PathBuf>,
    overrides: ClusterConfig,
    verbose: bool,
}

impl ImportCommand {
    /// Create a new import command.
    ///
    /// `overrides` holds connection settings from the environment and flags.
    pub fn new(
        args: ImportArgs,
        config_path: Option<PathBuf>,
        overrides: ClusterConfig,
        verbose: bool,
    ) -> Self {
        Self {
            args,
            config_path,
            overrides,
            verbose,
        }
    }

    fn options(&self) -> ImportOptions {
        ImportOptions {
            filenames: self.args.filenames.clone(),
            base_image: self.args.image.clone(),
            generator: self.args.generator.clone(),
            as_template: self.args.as_template.clone(),
            output_version: self.args.output_version.clone(),
            output: self.args.output,
            dry_run: self.args.dry_run,
            params: self.args.params.clone(),
            verbose: self.verbose,
            ..Default::default()
        }
    }
}

fn connect(cluster: &ClusterConfig) -> Result<ClusterClient> {
    let server = cluster
        .server
        .as_deref()
        .ok_or_else(|| ImportError::ConfigValidationError {
            message: "no cluster server configured; use --server, APPIMPORT_SERVER, \
                      or set server in the config file"
                .to_string(),
        })?;
    Ok(ClusterClient::new(server, cluster.token.clone())?)
}

impl Command for ImportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let scheme = Scheme::builtin();
        let mut config = self.options().complete(&scheme.prioritized_versions())?;

        let cluster = load_cluster_config(self.config_path.as_deref(), self.overrides.clone())?;
        config.namespace = cluster.namespace().to_string();

        let printing = config.should_print();
        let use_remote = !printing && !self.args.local;
        let use_rest = !printing && !config.dry_run;
        let client = if use_remote || use_rest {
            Some(connect(&cluster)?)
        } else {
            None
        };

        let local = LocalProcessor::new();
        let remote = client.as_ref().filter(|_| use_remote).map(RemoteProcessor::new);
        let rest = client.as_ref().filter(|_| use_rest).map(RestApplier::new);
        let processor: &dyn TemplateProcessor = match &remote {
            Some(remote) => remote,
            None => &local,
        };
        let applier: &dyn Applier = match &rest {
            Some(rest) => rest,
            None => &DryRunApplier,
        };

        let fetcher = HttpFetcher::new()?;
        let generator = AppJsonGenerator::new();
        let compat = SchemeCheck::new(&scheme, &scheme);

        let importer = Importer::new(
            &config,
            Collaborators {
                fetcher: &fetcher,
                generator: &generator,
                compat: &compat,
                processor,
                applier,
            },
        );

        let stdin = io::stdin();
        let stdout = io::stdout();
        let report = importer.run(&mut stdin.lock(), &mut stdout.lock(), ui)?;

        if report.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code()))
        }
    }
}
