//! C language layer over the graph core
//!
//! Partitions the objects of the core graph into heap objects, named global
//! objects and per-frame stack objects, and adds the reachability pruning
//! that detects memory leaks.

use super::stack_frame::{ClangStackFrame, FunctionDeclaration};
use crate::config::{RuntimeCheck, SmgConfig};
use crate::errors::{Result, SmgError};
use crate::features::smg::domain::{
    MachineModel, SmgEdgeHasValue, SmgEdgePointsTo, SmgObject, SmgValue,
};
use crate::features::smg::graph::Smg;
use crate::features::smg::ports::TypeSizeOracle;
use crate::features::smg::verifier::{check_clang_smg, verify_clang_smg};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Symbolic memory graph of a C program state
#[derive(Debug, Clone)]
pub struct ClangSmg {
    smg: Smg,
    /// Frames, innermost last
    stack_objects: Vec<ClangStackFrame>,
    heap_objects: FxHashSet<SmgObject>,
    global_objects: FxHashMap<String, SmgObject>,
    has_leaks: bool,
}

impl ClangSmg {
    pub fn new(machine_model: MachineModel) -> Self {
        Self::from_smg(Smg::new(machine_model))
    }

    pub fn with_config(config: SmgConfig) -> Self {
        Self::from_smg(Smg::with_config(config))
    }

    pub fn with_oracle(config: SmgConfig, oracle: Arc<dyn TypeSizeOracle>) -> Self {
        Self::from_smg(Smg::with_oracle(config, oracle))
    }

    /// Wrap a fresh core graph; its null object becomes a heap object
    fn from_smg(smg: Smg) -> Self {
        let mut heap_objects = FxHashSet::default();
        heap_objects.insert(smg.get_null_object().clone());

        Self {
            smg,
            stack_objects: Vec::new(),
            heap_objects,
            global_objects: FxHashMap::default(),
            has_leaks: false,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Partitioned insertion
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_heap_object(&mut self, object: SmgObject) -> Result<()> {
        if self.heap_objects.contains(&object) {
            if self.smg.config().perform_checks {
                return Err(SmgError::DuplicateHeapObject(object));
            }
            warn!("Heap object [{}] already in the SMG", object);
        }

        self.smg.add_object(object.clone())?;
        self.heap_objects.insert(object);
        Ok(())
    }

    /// Add a global object, bound under its label
    pub fn add_global_object(&mut self, object: SmgObject) -> Result<()> {
        if self.smg.config().perform_checks && self.global_objects.values().any(|g| g == &object)
        {
            return Err(SmgError::DuplicateGlobalObject(object));
        }
        if self.global_objects.contains_key(object.label()) {
            return Err(SmgError::DuplicateGlobalName(object.label().to_string()));
        }

        self.smg.add_object(object.clone())?;
        self.global_objects.insert(object.label().to_string(), object);
        Ok(())
    }

    /// Add a local of the innermost frame, bound under its label
    pub fn add_stack_object(&mut self, object: SmgObject) -> Result<()> {
        let frame = self.stack_objects.last().ok_or(SmgError::NoStackFrame)?;
        if frame.contains_variable(object.label()) {
            return Err(SmgError::DuplicateStackVariable {
                function: frame.function().name.clone(),
                name: object.label().to_string(),
            });
        }

        self.smg.add_object(object.clone())?;
        let frame = self.stack_objects.last_mut().ok_or(SmgError::NoStackFrame)?;
        frame.add_stack_variable(object.label().to_string(), object)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Stack frames
    // ═══════════════════════════════════════════════════════════════════════

    /// Push a frame for `function`.
    ///
    /// The return object of a non-void function joins the core graph but
    /// stays out of the heap partition. A return type the sizing oracle
    /// cannot size is rejected before the frame is pushed.
    pub fn add_stack_frame(&mut self, function: FunctionDeclaration) -> Result<()> {
        let return_size = match &function.return_type {
            Some(ty) => Some(
                self.smg
                    .size_of(ty)
                    .ok_or_else(|| SmgError::UnsizableType(ty.to_string()))?,
            ),
            None => None,
        };
        let frame = ClangStackFrame::new(function, return_size);

        if let Some(ret) = frame.return_object() {
            self.smg.add_object(ret.clone())?;
        }

        debug!(
            "Pushed stack frame for '{}' (depth {})",
            frame.function().name,
            self.stack_objects.len() + 1
        );
        self.stack_objects.push(frame);
        Ok(())
    }

    /// Pop the innermost frame, removing its objects and their edges
    pub fn drop_stack_frame(&mut self) -> Result<()> {
        let frame = self.stack_objects.pop().ok_or(SmgError::NoStackFrame)?;
        for object in frame.all_objects() {
            self.smg.remove_object_and_edges(object);
        }

        debug!(
            "Dropped stack frame for '{}' (depth {})",
            frame.function().name,
            self.stack_objects.len()
        );
        self.checkpoint("drop_stack_frame");
        Ok(())
    }

    pub fn stack_frames(&self) -> impl Iterator<Item = &ClangStackFrame> + '_ {
        self.stack_objects.iter().rev()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack_objects.len()
    }

    pub fn get_function_return_object(&self) -> Result<Option<&SmgObject>> {
        self.stack_objects
            .last()
            .map(ClangStackFrame::return_object)
            .ok_or(SmgError::NoStackFrame)
    }

    /// Name of the function whose frame owns `object`
    pub fn get_function_name(&self, object: &SmgObject) -> Option<&str> {
        self.stack_frames()
            .find(|frame| frame.contains_object(object))
            .map(|frame| frame.function().name.as_str())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════════

    /// Resolve a variable name: innermost frame first, then globals.
    ///
    /// Outer frames are never consulted.
    pub fn get_object_for_visible_variable(&self, name: &str) -> Option<&SmgObject> {
        self.stack_objects
            .last()
            .and_then(|frame| frame.find_variable(name))
            .or_else(|| self.global_objects.get(name))
    }

    pub fn heap_objects(&self) -> &FxHashSet<SmgObject> {
        &self.heap_objects
    }

    pub fn global_objects(&self) -> &FxHashMap<String, SmgObject> {
        &self.global_objects
    }

    pub fn is_heap_object(&self, object: &SmgObject) -> bool {
        self.heap_objects.contains(object)
    }

    pub fn smg(&self) -> &Smg {
        &self.smg
    }

    /// Raw access to the core graph; partition bookkeeping is bypassed
    pub fn smg_mut(&mut self) -> &mut Smg {
        &mut self.smg
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Core mutators
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_value(&mut self, value: SmgValue) -> Result<()> {
        self.smg.add_value(value)
    }

    pub fn add_has_value_edge(&mut self, edge: SmgEdgeHasValue) {
        self.smg.add_has_value_edge(edge);
    }

    pub fn add_points_to_edge(&mut self, edge: SmgEdgePointsTo) {
        self.smg.add_points_to_edge(edge);
    }

    pub fn remove_has_value_edge(&mut self, edge: &SmgEdgeHasValue) -> bool {
        self.smg.remove_has_value_edge(edge)
    }

    pub fn set_validity(&mut self, object: &SmgObject, validity: bool) -> Result<()> {
        self.smg.set_validity(object, validity)
    }

    pub fn remove_heap_object_and_edges(&mut self, object: &SmgObject) -> bool {
        self.heap_objects.remove(object);
        self.smg.remove_object_and_edges(object)
    }

    pub fn merge_values(&mut self, v1: SmgValue, v2: SmgValue) {
        self.smg.merge_values(v1, v2);
        self.checkpoint("merge_values");
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Leaks
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_memory_leak(&mut self) {
        self.has_leaks = true;
    }

    pub fn has_memory_leaks(&self) -> bool {
        self.has_leaks
    }

    /// Remove every object and value unreachable from stack and global roots.
    ///
    /// Returns the pruned objects that were still valid; any such object sets
    /// the leak flag.
    pub fn prune_unreachable(&mut self) -> FxHashSet<SmgObject> {
        let mut hv_by_object: FxHashMap<&SmgObject, Vec<SmgValue>> = FxHashMap::default();
        for hv in self.smg.get_hv_edges() {
            hv_by_object.entry(hv.object()).or_default().push(hv.value());
        }
        let mut pt_by_value: FxHashMap<SmgValue, &SmgObject> = FxHashMap::default();
        for pt in self.smg.get_pt_edges() {
            pt_by_value.insert(pt.value(), pt.object());
        }

        let mut seen_objects: FxHashSet<SmgObject> = FxHashSet::default();
        let mut seen_values: FxHashSet<SmgValue> = FxHashSet::default();
        let mut workqueue: VecDeque<&SmgObject> = VecDeque::new();

        let roots = self
            .stack_objects
            .iter()
            .flat_map(ClangStackFrame::all_objects)
            .chain(self.global_objects.values());
        for root in roots {
            if seen_objects.insert(root.clone()) {
                workqueue.push_back(root);
            }
        }

        while let Some(object) = workqueue.pop_front() {
            let Some(values) = hv_by_object.get(object) else {
                continue;
            };
            for value in values {
                if !seen_values.insert(*value) {
                    continue;
                }
                if let Some(target) = pt_by_value.get(value) {
                    if seen_objects.insert((*target).clone()) {
                        workqueue.push_back(*target);
                    }
                }
            }
        }

        let stray_objects: Vec<SmgObject> = self
            .smg
            .get_objects()
            .iter()
            .filter(|o| o.not_null() && !seen_objects.contains(*o))
            .cloned()
            .collect();
        let stray_values: Vec<SmgValue> = self
            .smg
            .get_values()
            .iter()
            .filter(|v| !v.is_null() && !seen_values.contains(*v))
            .copied()
            .collect();

        let pruned_objects = stray_objects.len();
        let mut leaked = FxHashSet::default();
        for object in stray_objects {
            if self.smg.is_object_valid(&object).unwrap_or(false) {
                warn!("Pruning valid unreachable object [{}]: memory leak", object);
                leaked.insert(object.clone());
            }
            self.remove_heap_object_and_edges(&object);
        }
        for value in &stray_values {
            self.smg.remove_points_to_edge(*value);
            self.smg.remove_value(*value);
        }

        if !leaked.is_empty() {
            self.set_memory_leak();
        }
        debug!(
            "Pruned {} objects ({} leaked) and {} values",
            pruned_objects,
            leaked.len(),
            stray_values.len()
        );
        self.checkpoint("prune_unreachable");
        leaked
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Consistency checkpoints
    // ═══════════════════════════════════════════════════════════════════════

    /// Run the verifier if the configured granularity covers `level`
    pub fn perform_consistency_check(&self, level: RuntimeCheck) -> Result<()> {
        if !self.smg.config().runtime_check.is_finer_or_equal_than(level) {
            return Ok(());
        }

        let report = check_clang_smg(self);
        if report.is_consistent() {
            Ok(())
        } else {
            Err(SmgError::Inconsistent(report.to_string()))
        }
    }

    fn checkpoint(&self, operation: &str) {
        if self.smg.config().checkpoints_enabled() && !verify_clang_smg(self) {
            error!("SMG inconsistent after {}", operation);
        }
    }
}

impl Deref for ClangSmg {
    type Target = Smg;

    fn deref(&self) -> &Smg {
        &self.smg
    }
}

impl fmt::Display for ClangSmg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CLangSMG [")?;
        writeln!(f, " stack_objects=[")?;
        for frame in self.stack_frames() {
            writeln!(f, "  {}", frame)?;
        }
        writeln!(f, " ]")?;

        let mut heap: Vec<String> = self.heap_objects.iter().map(|o| o.to_string()).collect();
        heap.sort();
        writeln!(f, " heap_objects=[{}]", heap.join(", "))?;

        let mut globals: Vec<&String> = self.global_objects.keys().collect();
        globals.sort();
        writeln!(
            f,
            " global_objects=[{}]",
            globals
                .iter()
                .map(|g| g.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        writeln!(f, " {}", self.smg.values_to_string())?;
        writeln!(f, " {}", self.smg.pt_to_string())?;
        writeln!(f, " {}", self.smg.hv_to_string())?;
        writeln!(f, " memory_leaks={}", self.has_leaks)?;
        write!(f, "]")
    }
}
