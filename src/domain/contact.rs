use crate::domain::template::Attributes;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the contact list: a phone number as written plus optional attributes.
pub struct Contact {
    raw_phone: String,
    attributes: Attributes,
}

impl Contact {
    /// Contact without personalization data.
    pub fn new(raw_phone: impl Into<String>) -> Self {
        Self::with_attributes(raw_phone, Attributes::new())
    }

    pub fn with_attributes(raw_phone: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            raw_phone: raw_phone.into(),
            attributes,
        }
    }

    pub fn raw_phone(&self) -> &str {
        &self.raw_phone
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The `name` attribute, when present and not blank.
    pub fn display_name(&self) -> Option<&str> {
        self.attributes
            .get("name")
            .filter(|name| !name.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_ignores_blank_values() {
        let contact = Contact::new("5551234567");
        assert_eq!(contact.display_name(), None);
        assert!(contact.attributes().is_empty());

        let attributes: Attributes = [("name", " ")].into_iter().collect();
        let contact = Contact::with_attributes("5551234567", attributes);
        assert_eq!(contact.display_name(), None);

        let attributes: Attributes = [("name", "Jane")].into_iter().collect();
        let contact = Contact::with_attributes("5551234567", attributes);
        assert_eq!(contact.display_name(), Some("Jane"));
    }
}
