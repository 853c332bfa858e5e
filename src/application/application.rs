use colored::Colorize;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use namekit::contract::ContractViolation;
use namekit::names::{Name, StringArrayName, StringName};
use namekit::tree::{Directory, File, PATH_DELIMITER, root_node};

use crate::application::RuntimeConfig;
use crate::application::data::Backing;
use crate::cli::Command;

pub struct Application;

impl Application {
    pub fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        colored::control::set_override(runtime_config.colored);
        debug!("Running with config: {:?}", runtime_config);

        match &runtime_config.command {
            Command::Inspect {
                name,
                delimiter,
                backing,
            } => Self::inspect(name, *delimiter, *backing),
            Command::Convert {
                name,
                delimiter,
                to,
            } => Self::convert(name, *delimiter, to),
            Command::Tree { paths, find } => Self::tree(paths, find.as_deref()),
        }
    }

    fn parse_name(
        input: &str,
        delimiter: char,
        backing: Backing,
    ) -> Result<Box<dyn Name>, ApplicationError> {
        let name: Box<dyn Name> = match backing {
            Backing::Array => {
                Box::new(StringArrayName::parse(input, delimiter).context(ParseSnafu { input })?)
            }
            Backing::String => Box::new(
                StringName::with_delimiter(input, delimiter).context(ParseSnafu { input })?,
            ),
        };
        info!(
            "Parsed '{}' into {} components ({:?} backing)",
            input,
            name.no_components(),
            backing
        );
        Ok(name)
    }

    fn inspect(input: &str, delimiter: char, backing: Backing) -> Result<(), ApplicationError> {
        let name = Self::parse_name(input, delimiter, backing)?;

        println!("{} {}", "components:".bold(), name.no_components());
        for (index, component) in name.components().iter().enumerate() {
            println!("  [{}] {}", index.to_string().cyan(), component);
        }
        println!("{} {}", "as string:".bold(), name.as_string());
        println!("{} {}", "data string:".bold(), name.as_data_string());
        println!("{} {}", "hash code:".bold(), name.hash_code());
        Ok(())
    }

    fn convert(input: &str, delimiter: char, to: &str) -> Result<(), ApplicationError> {
        let name = Self::parse_name(input, delimiter, Backing::String)?;
        let rendered = name.as_string_with(to).context(RenderSnafu { input })?;
        println!("{rendered}");
        Ok(())
    }

    fn tree(paths: &[String], find: Option<&str>) -> Result<(), ApplicationError> {
        let root = root_node();
        for path in paths {
            Self::create_path(&root, path).context(TreeSnafu { path })?;
        }

        Self::print_directory(&root, 0).context(TreeSnafu { path: "/" })?;

        if let Some(base_name) = find {
            let found = root.find_nodes(base_name).context(SearchSnafu { base_name })?;
            println!("{} {}", "matches:".bold(), found.len());
            for node in found.iter() {
                let path = node.path().context(SearchSnafu { base_name })?;
                println!("  {} {}", node.node_type().to_string().green(), path);
            }
        }
        Ok(())
    }

    /// Every segment but the last is a directory, reused when one with that
    /// name already exists. The last segment becomes a new file.
    fn create_path(root: &Directory, path: &str) -> Result<(), ContractViolation> {
        let segments = path
            .split(PATH_DELIMITER)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();
        let Some((file_name, directories)) = segments.split_last() else {
            return Ok(());
        };

        let mut current = root.clone();
        for segment in directories {
            current = Self::child_directory(&current, segment)?;
        }
        File::new(file_name, &current)?;
        debug!("Created '{}'", path);
        Ok(())
    }

    fn child_directory(parent: &Directory, base_name: &str) -> Result<Directory, ContractViolation> {
        let existing = parent
            .child_nodes()
            .into_iter()
            .find(|child| child.is_directory() && child.own_base_name() == base_name);
        match existing {
            Some(node) => Directory::try_from(node),
            None => Directory::new(base_name, parent),
        }
    }

    fn print_directory(directory: &Directory, depth: usize) -> Result<(), ContractViolation> {
        for child in directory.child_nodes() {
            let label = child.node_type().to_string();
            println!("{}{} {}", "  ".repeat(depth), label.blue(), child.path()?);
            if child.is_directory() {
                Self::print_directory(&Directory::try_from(child)?, depth + 1)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Could not parse '{input}' as a name"))]
    ParseError {
        input: String,
        source: ContractViolation,
    },
    #[snafu(display("Could not render '{input}' with the requested delimiter"))]
    RenderError {
        input: String,
        source: ContractViolation,
    },
    #[snafu(display("Could not build tree path '{path}'"))]
    TreeError {
        path: String,
        source: ContractViolation,
    },
    #[snafu(display("Search for '{base_name}' failed"))]
    SearchError {
        base_name: String,
        source: ContractViolation,
    },
}
