use super::Value;

/// An object that can be checked by a rule.
///
/// The value returned by [`to_value`](Candidate::to_value) is what the expression sees under the
/// rule's alias. Fields should be exposed as members of a [`Value::Map`] so that expressions can
/// reach them with dotted access (`_this.start_date`).
pub trait Candidate {
    fn to_value(&self) -> Value;
}

impl Candidate for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Candidate for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}
