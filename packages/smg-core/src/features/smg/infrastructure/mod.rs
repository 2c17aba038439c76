//! SMG Infrastructure - Port implementations

pub mod c_type_sizer;

pub use c_type_sizer::CBasicTypeSizer;
