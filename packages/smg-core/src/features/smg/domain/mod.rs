//! SMG Domain - Graph entities and value objects
//!
//! - **Entity**: `SmgObject` (identity by allocation)
//! - **Value Object**: `SmgValue`, `SmgType`, edges (identity by contents)

pub mod edge;
pub mod filter;
pub mod object;
pub mod types;
pub mod value;

pub use edge::{SmgEdgeHasValue, SmgEdgePointsTo};
pub use filter::HasValueFilter;
pub use object::{ObjectId, SmgObject};
pub use types::{MachineModel, SmgType};
pub use value::SmgValue;
