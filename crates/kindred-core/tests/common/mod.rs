use kindred_core::{Reflect, RecordTag, RecordView, Shape};
use std::any::Any;

/// A postal address with scalar fields and an ordered list.
#[derive(Clone)]
pub struct Address {
    pub lines: Vec<String>,
    pub city: String,
    pub zip: u32,
}

impl Reflect for Address {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(
            RecordView::new(RecordTag::of::<Address>())
                .with_field("lines", &self.lines)
                .with_field("city", &self.city)
                .with_field("zip", &self.zip),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A person record nesting an address and an optional nickname.
///
/// Deliberately has no `native_eq`, so comparisons exercise the structural
/// path.
#[derive(Clone)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub nickname: Option<String>,
    pub address: Address,
}

impl Reflect for Person {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(
            RecordView::new(RecordTag::of::<Person>())
                .with_field("name", &self.name)
                .with_field("age", &self.age)
                .with_field("nickname", &self.nickname)
                .with_field("address", &self.address),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Build the reference person used across the test files
#[allow(dead_code)]
pub fn sample_person() -> Person {
    Person {
        name: "Ada Lovelace".to_string(),
        age: 36,
        nickname: Some("Ada".to_string()),
        address: sample_address(),
    }
}

/// Build the reference address used across the test files
#[allow(dead_code)]
pub fn sample_address() -> Address {
    Address {
        lines: vec!["12 Oak Lane".to_string(), "Apt 3".to_string()],
        city: "Springfield".to_string(),
        zip: 49423,
    }
}
