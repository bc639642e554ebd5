//! Shared fixtures for integration tests.

#![allow(dead_code)]

use deep_compare::inspect::{AccessError, Composite, Generated, Handle, Inspect, MemberInfo, View};
use deep_compare::{inspect_struct, CompareLogic, ComparisonConfig};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

// ============================================================================
// Plain records
// ============================================================================

pub struct Person {
    pub name: String,
    pub last_name: String,
    pub age: i32,
}

inspect_struct!(Person {
    name => "Name",
    last_name => "LastName",
    age => "Age",
});

pub fn person(name: &str, last_name: &str, age: i32) -> Person {
    Person {
        name: name.to_string(),
        last_name: last_name.to_string(),
        age,
    }
}

/// Same shape as [`Person`] under a different type label.
pub struct PersonDto {
    pub name: String,
    pub last_name: String,
    pub age: i32,
}

inspect_struct!(PersonDto {
    name => "Name",
    last_name => "LastName",
    age => "Age",
});

pub struct Foo2 {
    pub prop: String,
    pub value: i32,
}

inspect_struct!(Foo2 {
    prop => "Prop",
    value => "Value",
});

pub struct Shipment {
    pub identifier: i64,
    pub customer: String,
    pub insert_date: String,
}

inspect_struct!(Shipment {
    identifier => "IdentCode",
    #[marker("Compare")]
    customer => "Customer",
    #[marker("CompareIgnore")]
    insert_date => "InsertDate",
});

pub fn shipment(identifier: i64, customer: &str, insert_date: &str) -> Shipment {
    Shipment {
        identifier,
        customer: customer.to_string(),
        insert_date: insert_date.to_string(),
    }
}

pub struct Tank {
    pub capacity: u32,
    pub fuel: u32,
}

inspect_struct!(Tank {
    capacity => "Capacity",
    fuel => "Fuel",
});

pub struct TankPerson {
    pub name: String,
    pub tank: Tank,
}

inspect_struct!(TankPerson {
    name => "Name",
    tank => "Tank",
});

pub struct Secretive {
    pub visible: i32,
    pub hidden: i32,
    pub secret: i32,
}

inspect_struct!(Secretive {
    visible => "Visible",
    #[private]
    hidden => "Hidden",
    #[private]
    #[property]
    secret => "Secret",
});

pub struct Family {
    pub surname: String,
    pub members: Vec<Person>,
}

inspect_struct!(Family {
    surname => "Surname",
    members => "Members",
});

pub struct Fields {
    pub fields: BTreeMap<String, i32>,
}

inspect_struct!(Fields {
    fields => "Fields",
});

pub struct Empty;

inspect_struct!(Empty {});

// ============================================================================
// Hand-written composites
// ============================================================================

/// A record whose `Name` getter fails while `broken` is set.
pub struct PersonWithNotImplementedProperty {
    pub name: String,
    pub age: i32,
    pub broken: bool,
}

impl Inspect for PersonWithNotImplementedProperty {
    fn type_name(&self) -> &'static str {
        "PersonWithNotImplementedProperty"
    }

    fn view(&self) -> View<'_> {
        View::Object(self)
    }
}

impl Composite for PersonWithNotImplementedProperty {
    fn members(&self) -> Vec<MemberInfo> {
        vec![
            MemberInfo::field("Name").property(),
            MemberInfo::field("Age"),
        ]
    }

    fn member(&self, name: &str) -> Result<Handle<'_>, AccessError> {
        match name {
            "Name" if self.broken => Err(AccessError::failed("getter is not implemented")),
            "Name" => Ok(Handle::from(&self.name)),
            "Age" => Ok(Handle::from(&self.age)),
            _ => Err(AccessError::NotFound),
        }
    }
}

/// A record exposing one slot of its values through an indexer.
pub struct Indexed {
    pub values: Vec<i32>,
    pub slot: usize,
}

impl Inspect for Indexed {
    fn type_name(&self) -> &'static str {
        "Indexed"
    }

    fn view(&self) -> View<'_> {
        View::Object(self)
    }
}

impl Composite for Indexed {
    fn members(&self) -> Vec<MemberInfo> {
        vec![MemberInfo::field("Count"), MemberInfo::field("Item").indexer()]
    }

    fn member(&self, name: &str) -> Result<Handle<'_>, AccessError> {
        match name {
            "Count" => Ok(Handle::owned(self.values.len())),
            "Item" => self.values.get(self.slot).map(Handle::from).ok_or_else(|| {
                AccessError::failed(format!("index {} is out of range", self.slot))
            }),
            _ => Err(AccessError::NotFound),
        }
    }
}

/// A record counting how often its `Secret` getter runs.
pub struct Audited {
    pub name: String,
    pub age: i32,
    pub secret: i32,
    pub reads: Cell<usize>,
}

pub fn audited(name: &str, age: i32, secret: i32) -> Audited {
    Audited {
        name: name.to_string(),
        age,
        secret,
        reads: Cell::new(0),
    }
}

impl Inspect for Audited {
    fn type_name(&self) -> &'static str {
        "Audited"
    }

    fn view(&self) -> View<'_> {
        View::Object(self)
    }
}

impl Composite for Audited {
    fn members(&self) -> Vec<MemberInfo> {
        vec![
            MemberInfo::field("Name"),
            MemberInfo::field("Age"),
            MemberInfo::field("Secret"),
        ]
    }

    fn member(&self, name: &str) -> Result<Handle<'_>, AccessError> {
        match name {
            "Name" => Ok(Handle::from(&self.name)),
            "Age" => Ok(Handle::from(&self.age)),
            "Secret" => {
                self.reads.set(self.reads.get() + 1);
                Ok(Handle::from(&self.secret))
            }
            _ => Err(AccessError::NotFound),
        }
    }
}

// ============================================================================
// Cyclic graphs
// ============================================================================

pub struct Node {
    pub name: String,
    pub children: RefCell<Vec<Rc<Node>>>,
    pub parent: RefCell<Weak<Node>>,
}

inspect_struct!(Node {
    name => "Name",
    children => "Children",
    parent => "Parent",
});

/// A root with one child per name; every child points back at the root.
pub fn tree(root: &str, children: &[&str]) -> Rc<Node> {
    let root = Rc::new(Node {
        name: root.to_string(),
        children: RefCell::new(Vec::new()),
        parent: RefCell::new(Weak::new()),
    });
    for name in children {
        let child = Rc::new(Node {
            name: (*name).to_string(),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(Rc::downgrade(&root)),
        });
        root.children.borrow_mut().push(child);
    }
    root
}

type Echo = Generated<Box<dyn Fn() -> Vec<Rc<Looping>>>>;

/// A value that refers to itself both directly and through a lazily
/// produced sequence.
pub struct Looping {
    pub name: String,
    pub me: Weak<Looping>,
    pub echo: Echo,
}

inspect_struct!(Looping {
    name => "Name",
    me => "Me",
    echo => "Echo",
});

pub fn looping(name: &str) -> Rc<Looping> {
    Rc::new_cyclic(|weak: &Weak<Looping>| {
        let again = weak.clone();
        let produce: Box<dyn Fn() -> Vec<Rc<Looping>>> =
            Box::new(move || again.upgrade().into_iter().collect());
        Looping {
            name: name.to_string(),
            me: weak.clone(),
            echo: Generated::new(produce),
        }
    })
}

// ============================================================================
// Helpers
// ============================================================================

pub fn unlimited() -> ComparisonConfig {
    ComparisonConfig::builder().unlimited().build()
}

pub fn logic(config: ComparisonConfig) -> CompareLogic {
    CompareLogic::new().with_config(config)
}

pub fn paths(result: &deep_compare::ComparisonResult) -> Vec<&str> {
    result
        .differences
        .iter()
        .map(|d| d.property_name.as_str())
        .collect()
}
