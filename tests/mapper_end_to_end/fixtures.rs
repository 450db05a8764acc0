//! Demo entity types used by the end-to-end tests.

use redmap::{Entity, FieldBinding, Value};

// ============================================================================
// Address
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub state: Option<String>,
}

const ADDRESS_BINDINGS: &[FieldBinding] = &[
    FieldBinding::str("street"),
    FieldBinding::str("city"),
    FieldBinding::str("zip"),
    FieldBinding::str("state"),
];

impl Address {
    pub fn new(street: &str, city: &str, zip: &str, state: &str) -> Self {
        Address {
            street: Some(street.to_string()),
            city: Some(city.to_string()),
            zip: Some(zip.to_string()),
            state: Some(state.to_string()),
        }
    }
}

impl Entity for Address {
    fn type_name(&self) -> &'static str {
        "Address"
    }

    fn bindings(&self) -> &'static [FieldBinding] {
        ADDRESS_BINDINGS
    }

    fn get(&self, attr: &str) -> Option<Value> {
        let text = match attr {
            "street" => self.street.clone()?,
            "city" => self.city.clone()?,
            "zip" => self.zip.clone()?,
            "state" => self.state.clone()?,
            _ => return None,
        };
        Some(Value::Str(text))
    }

    fn set(&mut self, attr: &str, value: Value) {
        let Value::Str(text) = value else {
            return;
        };
        match attr {
            "street" => self.street = Some(text),
            "city" => self.city = Some(text),
            "zip" => self.zip = Some(text),
            "state" => self.state = Some(text),
            _ => {}
        }
    }
}

// ============================================================================
// Customer
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Customer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub active: Option<bool>,
    pub nick_names: Option<Vec<String>>,
    pub address: Option<Address>,
}

const CUSTOMER_BINDINGS: &[FieldBinding] = &[
    FieldBinding::str("firstName"),
    FieldBinding::str("lastName"),
    FieldBinding::int("age"),
    FieldBinding::bool("active"),
    FieldBinding::str_list("nickNames"),
    FieldBinding::reference("address"),
];

impl Customer {
    pub fn named(first: &str, last: &str) -> Self {
        Customer {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            ..Customer::default()
        }
    }

    /// A blank customer with an empty nested address attached, so that
    /// loads can reach the reference field.
    pub fn with_blank_address() -> Self {
        Customer {
            address: Some(Address::default()),
            ..Customer::default()
        }
    }
}

impl Entity for Customer {
    fn type_name(&self) -> &'static str {
        "Customer"
    }

    fn bindings(&self) -> &'static [FieldBinding] {
        CUSTOMER_BINDINGS
    }

    fn get(&self, attr: &str) -> Option<Value> {
        match attr {
            "firstName" => self.first_name.clone().map(Value::Str),
            "lastName" => self.last_name.clone().map(Value::Str),
            "age" => self.age.map(Value::Int),
            "active" => self.active.map(Value::Bool),
            _ => None,
        }
    }

    fn set(&mut self, attr: &str, value: Value) {
        match (attr, value) {
            ("firstName", Value::Str(text)) => self.first_name = Some(text),
            ("lastName", Value::Str(text)) => self.last_name = Some(text),
            ("age", Value::Int(n)) => self.age = Some(n),
            ("active", Value::Bool(b)) => self.active = Some(b),
            _ => {}
        }
    }

    fn get_list(&self, attr: &str) -> Option<Vec<Value>> {
        if attr != "nickNames" {
            return None;
        }
        self.nick_names
            .as_ref()
            .map(|names| names.iter().cloned().map(Value::Str).collect())
    }

    fn set_list(&mut self, attr: &str, values: Vec<Value>) {
        if attr != "nickNames" {
            return;
        }
        self.nick_names = Some(
            values
                .into_iter()
                .filter_map(|value| match value {
                    Value::Str(text) => Some(text),
                    _ => None,
                })
                .collect(),
        );
    }

    fn child(&self, attr: &str) -> Option<&dyn Entity> {
        if attr != "address" {
            return None;
        }
        self.address.as_ref().map(|a| a as &dyn Entity)
    }

    fn child_mut(&mut self, attr: &str) -> Option<&mut dyn Entity> {
        if attr != "address" {
            return None;
        }
        self.address.as_mut().map(|a| a as &mut dyn Entity)
    }
}
