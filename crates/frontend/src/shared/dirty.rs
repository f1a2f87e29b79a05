//! Отслеживание несохранённых изменений формы.

/// Accessor of one text field compared for dirtiness.
pub type TextField<T> = fn(&T) -> &str;

/// Значения равны с точностью до пробелов по краям.
pub fn same_trimmed(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

/// Copy of the last loaded or saved state of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    saved: T,
}

impl<T: Clone> Snapshot<T> {
    pub fn take(value: &T) -> Self {
        Self {
            saved: value.clone(),
        }
    }

    pub fn get(&self) -> &T {
        &self.saved
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.saved
    }

    pub fn replace(&mut self, value: &T) {
        self.saved = value.clone();
    }

    pub fn is_dirty(&self, current: &T, fields: &[TextField<T>]) -> bool {
        fields
            .iter()
            .any(|field| !same_trimmed(field(&self.saved), field(current)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Form {
        code: String,
        name: String,
    }

    const FIELDS: [TextField<Form>; 2] = [|f| &f.code, |f| &f.name];

    fn form(code: &str, name: &str) -> Form {
        Form {
            code: code.into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_whitespace_only_edit_is_clean() {
        let snap = Snapshot::take(&form("A", "Насос"));
        assert!(!snap.is_dirty(&form(" A ", "Насос "), &FIELDS));
    }

    #[test]
    fn test_real_edit_is_dirty() {
        let snap = Snapshot::take(&form("A", "Насос"));
        assert!(snap.is_dirty(&form("B", "Насос"), &FIELDS));
    }

    #[test]
    fn test_replace_resets_baseline() {
        let mut snap = Snapshot::take(&form("A", "x"));
        let edited = form("B", "x");
        snap.replace(&edited);
        assert!(!snap.is_dirty(&edited, &FIELDS));
    }
}
