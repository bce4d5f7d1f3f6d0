use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::prompt::SystemInstructions;
use crate::wire::ApplicationCategory;

pub struct SavedPaths {
    pub request: PathBuf,
    pub response: PathBuf,
}

#[derive(Serialize)]
struct RequestRecord<'a> {
    id: &'a str,
    category: ApplicationCategory,
    template_version: &'a str,
    system: &'a str,
    user: &'a str,
}

fn tx_dir(root: &Path, id: &str) -> PathBuf {
    root.join(id)
}

/// Dump what was sent to the generator and what came back, keyed by the
/// request id.
pub fn save(
    root: &Path,
    id: &str,
    instructions: &SystemInstructions,
    user: &str,
    raw_response: &str,
) -> Result<SavedPaths> {
    let dir = tx_dir(root, id);
    fs::create_dir_all(&dir)?;

    let request = dir.join("generate.request.json");
    let record = RequestRecord {
        id,
        category: instructions.category,
        template_version: instructions.version,
        system: &instructions.text,
        user,
    };
    fs::write(&request, to_string_pretty(&record)?)?;

    let response = dir.join("generate.response.txt");
    fs::write(&response, raw_response)?;

    Ok(SavedPaths { request, response })
}
