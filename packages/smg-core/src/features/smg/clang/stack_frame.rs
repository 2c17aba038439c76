//! Stack frames of the C language layer

use crate::errors::{Result, SmgError};
use crate::features::smg::domain::{SmgObject, SmgType};
use rustc_hash::FxHashMap;
use std::fmt;

/// Label of the object holding a function's return value
pub const RETVAL_LABEL: &str = "___cpa_temp_result_var_";

/// Function a frame belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionDeclaration {
    pub name: String,
    /// `None` for `void`
    pub return_type: Option<SmgType>,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<String>, return_type: Option<SmgType>) -> Self {
        Self {
            name: name.into(),
            return_type,
        }
    }

    pub fn void(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

/// One activation record: the function, its named locals and the object
/// holding its return value.
#[derive(Debug, Clone)]
pub struct ClangStackFrame {
    function: FunctionDeclaration,
    stack_variables: FxHashMap<String, SmgObject>,
    return_value_object: Option<SmgObject>,
}

impl ClangStackFrame {
    /// New frame for `function`.
    ///
    /// `return_size` is the byte size of the return type, `None` for `void`.
    /// Callers size the return type up front; a frame gets a return object
    /// only for a non-zero size.
    pub fn new(function: FunctionDeclaration, return_size: Option<u64>) -> Self {
        let return_value_object = return_size
            .filter(|size| *size > 0)
            .map(|size| SmgObject::new(size, RETVAL_LABEL));

        Self {
            function,
            stack_variables: FxHashMap::default(),
            return_value_object,
        }
    }

    /// Bind `name` to `object`; a name can be bound once per frame
    pub fn add_stack_variable(&mut self, name: impl Into<String>, object: SmgObject) -> Result<()> {
        let name = name.into();
        if self.stack_variables.contains_key(&name) {
            return Err(SmgError::DuplicateStackVariable {
                function: self.function.name.clone(),
                name,
            });
        }

        self.stack_variables.insert(name, object);
        Ok(())
    }

    pub fn get_variable(&self, name: &str) -> Result<&SmgObject> {
        self.stack_variables
            .get(name)
            .ok_or_else(|| SmgError::MissingStackVariable {
                function: self.function.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.stack_variables.contains_key(name)
    }

    pub(crate) fn find_variable(&self, name: &str) -> Option<&SmgObject> {
        self.stack_variables.get(name)
    }

    pub fn variables(&self) -> &FxHashMap<String, SmgObject> {
        &self.stack_variables
    }

    /// Every object owned by the frame: locals plus the return object
    pub fn all_objects(&self) -> Vec<&SmgObject> {
        self.stack_variables
            .values()
            .chain(self.return_value_object.iter())
            .collect()
    }

    pub fn contains_object(&self, object: &SmgObject) -> bool {
        self.return_value_object.as_ref() == Some(object)
            || self.stack_variables.values().any(|o| o == object)
    }

    pub fn return_object(&self) -> Option<&SmgObject> {
        self.return_value_object.as_ref()
    }

    pub fn function(&self) -> &FunctionDeclaration {
        &self.function
    }
}

impl fmt::Display for ClangStackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.stack_variables.keys().collect();
        names.sort();
        write!(
            f,
            "<{}> {}",
            self.function.name,
            names
                .iter()
                .map(|n| n.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}
