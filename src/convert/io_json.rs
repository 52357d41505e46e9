use log::debug;
use snafu::prelude::*;
use xlsform_survey::Workbook;

use super::io_common::FormFile;
use super::{ConvertResult, ParsingJsonSnafu};

/// Reads a workbook that was already decoded into worksheets and rows.
pub fn read_workbook(form: &FormFile) -> ConvertResult<Workbook> {
    let workbook: Workbook = serde_json::from_slice(&form.bytes).context(ParsingJsonSnafu {
        path: form.path.clone(),
    })?;
    debug!(
        "read_workbook: {:?}: {} worksheets",
        form.file_name,
        workbook.worksheets.len()
    );
    Ok(workbook)
}
