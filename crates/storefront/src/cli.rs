//! Command-line support for `record-edit`: apply form edits to a JSON record.
//!
//! Arguments are `path=value` pairs applied in order. `--checkbox` marks the
//! next pair as a checkbox edit, whose value must be `true` or `false`.

use storefront_record::{
    from_json_str, validate_field_path, FieldInput, PathMutator, RecordError, ValidationError,
};
use thiserror::Error;
use tracing::debug;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("invalid field name {name:?}: {source}")]
    Field {
        name: String,
        #[source]
        source: ValidationError,
    },
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One parsed `path=value` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub path: String,
    pub input: FieldInput,
}

fn parse_pair(arg: &str, checkbox: bool) -> Result<Edit, CliError> {
    let (path, value) = arg
        .split_once('=')
        .ok_or_else(|| CliError::Usage(format!("expected <path>=<value>, got {arg:?}")))?;
    validate_field_path(path).map_err(|source| CliError::Field {
        name: path.to_string(),
        source,
    })?;
    let input = if checkbox {
        match value {
            "true" => FieldInput::Checked(true),
            "false" => FieldInput::Checked(false),
            other => {
                return Err(CliError::Usage(format!(
                    "checkbox value must be true or false, got {other:?}"
                )))
            }
        }
    } else {
        FieldInput::Text(value.to_string())
    };
    Ok(Edit {
        path: path.to_string(),
        input,
    })
}

/// Parse command-line arguments (without the program name) into edits.
pub fn parse_edits<S: AsRef<str>>(args: &[S]) -> Result<Vec<Edit>, CliError> {
    let mut edits = Vec::with_capacity(args.len());
    let mut checkbox = false;
    for arg in args {
        let arg = arg.as_ref();
        if arg == "--checkbox" {
            checkbox = true;
            continue;
        }
        edits.push(parse_pair(arg, checkbox)?);
        checkbox = false;
    }
    if checkbox {
        return Err(CliError::Usage("--checkbox must be followed by <path>=<value>".to_string()));
    }
    if edits.is_empty() {
        return Err(CliError::Usage("usage: record-edit [--checkbox] <path>=<value>...".to_string()));
    }
    Ok(edits)
}

/// Apply `edits` to the JSON document `json` and return the result as JSON.
pub fn apply_edits(json: &str, edits: &[Edit], mutator: &PathMutator) -> Result<String, CliError> {
    let mut state = from_json_str(json)?;
    for edit in edits {
        debug!(path = %edit.path, "applying edit");
        state = mutator.apply(&state, &edit.path, edit.input.clone());
    }
    Ok(serde_json::to_string(&state)?)
}
