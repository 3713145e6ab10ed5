//! Comprehensive Demo of Structural Deep Equality
//!
//! This example demonstrates all key features:
//! - Record comparison with nested difference reporting
//! - Numeric widening and float tolerance
//! - Unordered collections and maps
//! - Cyclic graphs and termination
//! - Dynamic JSON documents
//! - Native equality and how to bypass it
//! - Inaccessible values as errors

use kindred_core::logging::{init, Profile};
use kindred_core::{
    deep_compare, deep_equal, deep_equal_with, native_eq_via, CompareOptions, Reflect, RecordTag,
    RecordView, Shape,
};
use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

struct Address {
    street: String,
    city: String,
}

impl Reflect for Address {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(
            RecordView::new(RecordTag::of::<Address>())
                .with_field("street", &self.street)
                .with_field("city", &self.city),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Employee {
    name: String,
    badge: u32,
    address: Address,
}

impl Reflect for Employee {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(
            RecordView::new(RecordTag::of::<Employee>())
                .with_field("name", &self.name)
                .with_field("badge", &self.badge)
                .with_field("address", &self.address),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Ticket(String);

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Reflect for Ticket {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(RecordView::new(RecordTag::of::<Ticket>()).with_field("0", &self.0))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn native_eq(&self, other: &dyn Reflect) -> Option<bool> {
        native_eq_via(self, other)
    }
}

struct Node {
    label: String,
    next: RefCell<Option<Rc<Node>>>,
}

impl Reflect for Node {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(
            RecordView::new(RecordTag::of::<Node>())
                .with_field("label", &self.label)
                .with_field("next", &self.next),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn ring(labels: &[&str]) -> Rc<Node> {
    let nodes: Vec<Rc<Node>> = labels
        .iter()
        .map(|label| {
            Rc::new(Node {
                label: (*label).to_string(),
                next: RefCell::new(None),
            })
        })
        .collect();
    for (index, node) in nodes.iter().enumerate() {
        *node.next.borrow_mut() = Some(Rc::clone(&nodes[(index + 1) % nodes.len()]));
    }
    Rc::clone(&nodes[0])
}

fn employee(name: &str, badge: u32, street: &str) -> Employee {
    Employee {
        name: name.to_string(),
        badge,
        address: Address {
            street: street.to_string(),
            city: "Springfield".to_string(),
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  Kindred - Structural Deep Equality Demo                ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    // ═══════════════════════════════════════════════════════════
    // SECTION 1: Records and Difference Reporting
    // ═══════════════════════════════════════════════════════════
    println!("📦 SECTION 1: Records and Difference Reporting\n");

    let left = employee("Ada", 1001, "12 Oak Lane");
    let same = employee("Ada", 1001, "12 Oak Lane");
    println!("✓ identical employees equal: {}", deep_equal(&left, &same)?);

    let moved = employee("Ada", 1001, "14 Oak Lane");
    let reporting = CompareOptions::default().collecting_difference();
    let outcome = deep_compare(&left, &moved, &reporting)?;
    if let Some(difference) = outcome.difference {
        println!("✓ divergence found: {difference}");
    }
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 2: Numeric Widening and Float Tolerance
    // ═══════════════════════════════════════════════════════════
    println!("🔢 SECTION 2: Numeric Widening and Float Tolerance\n");

    println!("✓ 7i8 == 7u64: {}", deep_equal(&7i8, &7u64)?);
    println!("✓ 3.0f32 == 3i32: {}", deep_equal(&3.0f32, &3i32)?);
    println!(
        "✓ 1.0 == 1.0 + 1e-12 (default tolerance): {}",
        deep_equal(&1.0f64, &(1.0 + 1e-12))?
    );
    let strict = CompareOptions::default().with_float_epsilon(0.0);
    println!(
        "✓ same pair under zero tolerance: {}",
        deep_equal_with(&1.0f64, &(1.0 + 1e-12), &strict)?
    );
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 3: Unordered Collections and Maps
    // ═══════════════════════════════════════════════════════════
    println!("🔀 SECTION 3: Unordered Collections and Maps\n");

    let forward: HashSet<i32> = (0..10).collect();
    let backward: HashSet<i32> = (0..10).rev().collect();
    println!("✓ sets ignore order: {}", deep_equal(&forward, &backward)?);

    let hash: HashMap<String, u32> =
        HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
    let btree: BTreeMap<String, u32> =
        BTreeMap::from([("b".to_string(), 2), ("a".to_string(), 1)]);
    println!(
        "✓ hash map equals btree map with same entries: {}",
        deep_equal(&hash, &btree)?
    );
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 4: Cyclic Graphs
    // ═══════════════════════════════════════════════════════════
    println!("🔁 SECTION 4: Cyclic Graphs\n");

    let ring_a = ring(&["n1", "n2", "n3"]);
    let ring_b = ring(&["n1", "n2", "n3"]);
    println!("✓ equal rings terminate: {}", deep_equal(&*ring_a, &*ring_b)?);

    let ring_c = ring(&["n1", "n2", "other"]);
    println!(
        "✓ rings with a differing node: {}",
        deep_equal(&*ring_a, &*ring_c)?
    );
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 5: Dynamic JSON Documents
    // ═══════════════════════════════════════════════════════════
    println!("📄 SECTION 5: Dynamic JSON Documents\n");

    let parsed: serde_json::Value =
        serde_json::from_str(r#"{"name": "Ada", "scores": [1, 2, 3]}"#)?;
    let built = serde_json::json!({"scores": [1, 2, 3], "name": "Ada"});
    println!("✓ parsed equals built: {}", deep_equal(&parsed, &built)?);

    let altered = serde_json::json!({"scores": [1, 9, 3], "name": "Ada"});
    let outcome = deep_compare(&parsed, &altered, &reporting)?;
    if let Some(difference) = outcome.difference {
        println!("✓ JSON divergence: {difference}");
    }
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 6: Native Equality
    // ═══════════════════════════════════════════════════════════
    println!("🤝 SECTION 6: Native Equality\n");

    let upper = Ticket(String::from("INC-42"));
    let lower = Ticket(String::from("inc-42"));
    println!("✓ ticket equality is case-insensitive: {}", deep_equal(&upper, &lower)?);
    let structural = CompareOptions::default().ignoring_native_equality();
    println!(
        "✓ under ignore_native_equality: {}",
        deep_equal_with(&upper, &lower, &structural)?
    );
    println!();

    // ═══════════════════════════════════════════════════════════
    // SECTION 7: Inaccessible Values
    // ═══════════════════════════════════════════════════════════
    println!("🚫 SECTION 7: Inaccessible Values\n");

    let cell_a = RefCell::new(5);
    let cell_b = RefCell::new(5);
    let hold = cell_b.borrow_mut();
    match deep_equal(&cell_a, &cell_b) {
        Err(err) => println!("✓ borrowed cell reported: {err} (code {})", err.code()),
        Ok(_) => println!("unexpected verdict"),
    }
    drop(hold);
    println!("✓ after releasing the borrow: {}", deep_equal(&cell_a, &cell_b)?);

    println!("\n✅ Demo complete");
    Ok(())
}
