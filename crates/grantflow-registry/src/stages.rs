//! Stages used by the built-in workflows.

use grantflow_workflow::Stage;

pub const REQUEST: Stage = Stage::new_static("Request", false);
pub const REQUEST_SAME: Stage = Stage::new_static("RequestSame", false);
pub const REQUEST_EXT: Stage = Stage::new_static("RequestExt", true);
pub const REQUEST_COM: Stage = Stage::new_static("RequestCom", true);
pub const CONCEPT: Stage = Stage::new_static("Concept", false);
pub const PROPOSAL: Stage = Stage::new_static("Proposal", true);
