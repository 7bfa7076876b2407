use std::fs;
use std::path::Path;

use homedir::my_home;
use rst_common::with_logging::log::debug;

use crate::types::CliError;

pub fn setup_homedir(dir: &str) -> Result<String, CliError> {
    let current_homedir = my_home().map_err(|err| CliError::HomeDirError(err.to_string()))?;

    match current_homedir {
        Some(current_dir) => {
            let lineage_dir = format!("{}/{}", current_dir.display(), dir);
            let lineage_path = Path::new(lineage_dir.clone().as_str()).to_owned();

            if !lineage_path.exists() {
                debug!("lineage directory still not exists");
                let _ = fs::create_dir_all(lineage_path.clone())
                    .map_err(|err| CliError::HomeDirError(err.to_string()))?;
            }

            debug!("lineage home directory: {}", lineage_path.display());
            Ok(lineage_path.display().to_string())
        }
        None => Err(CliError::HomeDirError(
            "unknown home directory path".to_string(),
        )),
    }
}
