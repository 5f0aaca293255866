//! Command line arguments and the top-level run.

use crate::config::{self, InventoryConfig, OutputFormat};
use crate::{get_sorted_vms, logging, render_inventory};
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::error::Error;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Generate an Ansible inventory from a VM list CSV exported by the mdx user portal
#[derive(Parser, Debug)]
#[command(name = "mdxcsv2inventory", version, about, long_about = None)]
pub struct Cli {
    /// CSV file generated by mdx user portal, "-" for stdin
    pub csv: PathBuf,

    /// Use IPv6 address for hosts
    #[arg(short = '6', long)]
    pub use_ipv6: bool,

    /// User to run ansible
    #[arg(short = 'u', long, value_name = "USER", env = "MDX_ANSIBLE_USER",
          default_value = config::DEFAULT_ANSIBLE_USER)]
    pub ansible_user: String,

    /// Group name for all nodes
    #[arg(short = 'd', long, value_name = "GROUP", env = "MDX_DEFAULT_GROUP",
          default_value = config::DEFAULT_GROUP)]
    pub default_group: String,

    /// Make a group GROUP with VM names matched with REGEXP
    /// (Rust regex syntax: no lookaround, no backreferences)
    #[arg(short = 'g', long, num_args = 2, action = ArgAction::Append,
          value_names = ["GROUP", "REGEXP"])]
    pub group_regexp: Vec<String>,

    /// Make a group GROUP without VM names matched with REGEXP
    /// (Rust regex syntax: no lookaround, no backreferences)
    #[arg(short = 'G', long, num_args = 2, action = ArgAction::Append,
          value_names = ["GROUP", "REGEXP"])]
    pub group_regexp_invert: Vec<String>,

    /// Make a group with specified VM names
    #[arg(long, num_args = 1.., action = ArgAction::Append,
          value_names = ["GROUP", "VM_NAME"])]
    pub group_with: Vec<String>,

    /// Make a group without specified VM names
    #[arg(long, num_args = 1.., action = ArgAction::Append,
          value_names = ["GROUP", "VM_NAME"])]
    pub group_without: Vec<String>,

    /// Make per-node groups in the inventory
    #[arg(long)]
    pub per_node_groups: bool,

    /// Enable host var 'ethipv6'
    #[arg(long)]
    pub enable_ethipv6: bool,

    /// Enable IPv6 link local address on inventory
    #[arg(long)]
    pub enable_linklocal: bool,

    /// Output file name, default is STDOUT
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Ini)]
    pub format: OutputFormat,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: log::LevelFilter,

    /// log4rs YAML configuration file, overrides --log-level
    #[arg(long, value_name = "FILE")]
    pub log_config: Option<PathBuf>,

    /// Group option values split per occurrence, filled from the matches.
    #[arg(skip)]
    pub occurrences: GroupOccurrences,
}

/// Values of each repeatable group option, one `Vec` per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOccurrences {
    pub group_regexp: Vec<Vec<String>>,
    pub group_regexp_invert: Vec<Vec<String>>,
    pub group_with: Vec<Vec<String>>,
    pub group_without: Vec<Vec<String>>,
}

impl GroupOccurrences {
    fn from_matches(matches: &ArgMatches) -> GroupOccurrences {
        let split = |id: &str| -> Vec<Vec<String>> {
            matches
                .get_occurrences::<String>(id)
                .map(|occ| occ.map(|values| values.cloned().collect()).collect())
                .unwrap_or_default()
        };
        GroupOccurrences {
            group_regexp: split("group_regexp"),
            group_regexp_invert: split("group_regexp_invert"),
            group_with: split("group_with"),
            group_without: split("group_without"),
        }
    }
}

/// `[GROUP, NAME...]` occurrences to `(GROUP, [NAME...])`.
fn name_lists(occurrences: &[Vec<String>]) -> Vec<(String, Vec<String>)> {
    occurrences
        .iter()
        .filter_map(|values| values.split_first())
        .map(|(group, names)| (group.clone(), names.to_vec()))
        .collect()
}

/// `[GROUP, REGEXP]` occurrences to `(GROUP, REGEXP)`.
fn pattern_pairs(occurrences: &[Vec<String>]) -> Vec<(String, String)> {
    occurrences
        .iter()
        .filter_map(|values| match values.as_slice() {
            [group, pattern] => Some((group.clone(), pattern.clone())),
            _ => None,
        })
        .collect()
}

impl Cli {
    /// Parse `std::env::args`, exiting on usage errors like `Parser::parse`.
    pub fn parse_args() -> Cli {
        let matches = Cli::command().get_matches();
        Cli::from_grouped_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Parse `args`, keeping the values of each group option occurrence together.
    pub fn try_parse_args_from<I, T>(args: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Cli::command().try_get_matches_from(args)?;
        Cli::from_grouped_matches(&matches)
    }

    fn from_grouped_matches(matches: &ArgMatches) -> Result<Cli, clap::Error> {
        let mut cli = Cli::from_arg_matches(matches)?;
        cli.occurrences = GroupOccurrences::from_matches(matches);
        Ok(cli)
    }

    /// The run configuration these arguments describe.
    pub fn to_config(&self) -> InventoryConfig {
        InventoryConfig {
            use_ipv6_preference: self.use_ipv6,
            management_user: self.ansible_user.clone(),
            default_group_name: self.default_group.clone(),
            enable_per_node_groups: self.per_node_groups,
            include_groups: name_lists(&self.occurrences.group_with),
            exclude_groups: name_lists(&self.occurrences.group_without),
            include_pattern_groups: pattern_pairs(&self.occurrences.group_regexp),
            exclude_pattern_groups: pattern_pairs(&self.occurrences.group_regexp_invert),
            enable_ipv6_host_var: self.enable_ethipv6,
            enable_link_local: self.enable_linklocal,
            output_format: self.format,
        }
    }

    fn open_input(&self) -> Result<Box<dyn Read>, Box<dyn Error>> {
        if self.csv.as_os_str() == "-" {
            return Ok(Box::new(io::stdin()));
        }
        let file = File::open(&self.csv)
            .map_err(|e| format!("Error opening {}: {e}", self.csv.display()))?;
        Ok(Box::new(file))
    }

    /// Run the whole pipeline.
    ///
    /// The output file is created only once the document is rendered.
    pub fn execute(self) -> Result<(), Box<dyn Error>> {
        logging::init_logging(self.log_level, self.log_config.as_deref())?;
        log::info!("#Start mdxcsv2inventory csv={}", self.csv.display());

        let config = self.to_config();
        let mut vms = get_sorted_vms(self.open_input()?)?;
        let document = render_inventory(&mut vms, &config)?;

        let mut output: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(
                File::create(path)
                    .map_err(|e| format!("Error creating {}: {e}", path.display()))?,
            ),
            None => Box::new(io::stdout().lock()),
        };
        output.write_all(document.as_bytes())?;
        output.flush()?;

        log::info!("wrote inventory for {} VMs", vms.len());
        Ok(())
    }
}
