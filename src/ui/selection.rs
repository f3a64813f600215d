//! Single-record selection with a change callback

use crate::model::TemplateRef;
use std::sync::Arc;

/// Callback invoked with the newly selected record, or `None` when cleared
pub type SelectCallback<'a> = Box<dyn FnMut(Option<&TemplateRef>) + 'a>;

/// At most one selected record
///
/// Selecting a record replaces whatever was selected before.
pub struct Selection<'a> {
    current: Option<TemplateRef>,
    on_change: SelectCallback<'a>,
}

impl<'a> Selection<'a> {
    /// Create an empty selection that reports changes to `on_change`
    pub fn new(on_change: impl FnMut(Option<&TemplateRef>) + 'a) -> Self {
        Self {
            current: None,
            on_change: Box::new(on_change),
        }
    }

    /// Selection that ignores changes
    #[must_use]
    pub fn silent() -> Self {
        Self::new(|_| {})
    }

    /// Select `record`, replacing any previous selection
    pub fn select(&mut self, record: &TemplateRef) {
        self.current = Some(Arc::clone(record));
        (self.on_change)(self.current.as_ref());
    }

    /// Clear the selection; the callback only fires if something was selected
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            (self.on_change)(None);
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&TemplateRef> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordBuilder;

    #[test]
    fn test_select_replaces_and_reports() {
        let mut seen: Vec<Option<String>> = Vec::new();
        {
            let mut selection = Selection::new(|r| seen.push(r.map(|r| r.id.clone())));
            let a = RecordBuilder::new("a").build();
            let b = RecordBuilder::new("b").build();

            selection.select(&a);
            selection.select(&b);
            assert_eq!(selection.current().map(|r| r.id.as_str()), Some("b"));

            selection.clear();
            selection.clear();
            assert!(selection.current().is_none());
        }
        assert_eq!(
            seen,
            vec![Some("a".to_string()), Some("b".to_string()), None]
        );
    }
}
