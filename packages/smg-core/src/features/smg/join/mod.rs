//! Abstract join of two graphs
//!
//! Field-level join: given one object in each graph, rewrite the has-value
//! edges of both sides so the two objects end up with matching fields.

pub mod join_fields;
pub mod join_status;

pub use join_fields::{
    check_result_consistency, compatible_hv_edge_set, hv_set_of_common_null_values,
    hv_set_of_missing_null_values, hv_set_without_null_values_on_object,
    join_fields_relax_status, merge_non_null_has_value_edges, JoinFields,
};
pub use join_status::JoinStatus;
