//! Has-value edge filter

use super::edge::SmgEdgeHasValue;
use super::object::SmgObject;
use super::types::SmgType;
use super::value::SmgValue;

/// Conjunctive filter over has-value edges. An empty filter matches every
/// edge.
#[derive(Debug, Clone, Default)]
pub struct HasValueFilter {
    object: Option<SmgObject>,
    offset: Option<u64>,
    ty: Option<SmgType>,
    value: Option<SmgValue>,
    value_complement: bool,
}

impl HasValueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_by_object(mut self, object: &SmgObject) -> Self {
        self.object = Some(object.clone());
        self
    }

    pub fn filter_at_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn filter_by_type(mut self, ty: &SmgType) -> Self {
        self.ty = Some(ty.clone());
        self
    }

    pub fn filter_having_value(mut self, value: SmgValue) -> Self {
        self.value = Some(value);
        self.value_complement = false;
        self
    }

    pub fn filter_not_having_value(mut self, value: SmgValue) -> Self {
        self.value = Some(value);
        self.value_complement = true;
        self
    }

    pub fn holds_for(&self, edge: &SmgEdgeHasValue) -> bool {
        if let Some(object) = &self.object {
            if object != edge.object() {
                return false;
            }
        }

        if let Some(offset) = self.offset {
            if offset != edge.offset() {
                return false;
            }
        }

        if let Some(ty) = &self.ty {
            if ty != edge.ty() {
                return false;
            }
        }

        match self.value {
            Some(value) if self.value_complement => value != edge.value(),
            Some(value) => value == edge.value(),
            None => true,
        }
    }

    /// Matching edges out of `edges`
    pub fn filter<'a, I>(&self, edges: I) -> Vec<&'a SmgEdgeHasValue>
    where
        I: IntoIterator<Item = &'a SmgEdgeHasValue>,
    {
        edges.into_iter().filter(|e| self.holds_for(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_combine() {
        let obj = SmgObject::new(8, "obj");
        let other = SmgObject::new(8, "other");
        let int = SmgType::bytes(4);
        let edges = vec![
            SmgEdgeHasValue::new(obj.clone(), 0, int.clone(), SmgValue::new(1)),
            SmgEdgeHasValue::new(obj.clone(), 4, int.clone(), SmgValue::new(2)),
            SmgEdgeHasValue::new(other.clone(), 0, int.clone(), SmgValue::new(1)),
        ];

        assert_eq!(HasValueFilter::new().filter(&edges).len(), 3);
        assert_eq!(HasValueFilter::new().filter_by_object(&obj).filter(&edges).len(), 2);
        assert_eq!(
            HasValueFilter::new()
                .filter_by_object(&obj)
                .filter_at_offset(4)
                .filter(&edges)
                .len(),
            1
        );
        assert_eq!(
            HasValueFilter::new()
                .filter_having_value(SmgValue::new(1))
                .filter(&edges)
                .len(),
            2
        );
        assert_eq!(
            HasValueFilter::new()
                .filter_not_having_value(SmgValue::new(1))
                .filter(&edges)
                .len(),
            1
        );
        assert!(HasValueFilter::new()
            .filter_by_type(&SmgType::bytes(2))
            .filter(&edges)
            .is_empty());
    }
}
