use serde_json::{Map, Value};

/// A named deployable unit (one function of a service) and its raw configuration.
///
/// Properties are kept untyped so that consumers decide how strictly to
/// interpret them.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub name: String,
    pub properties: Map<String, Value>,
}

impl Unit {
    pub fn new(name: impl Into<String>, properties: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Returns the raw value of a property, if the unit declares it.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// The capability an orchestrator exposes over its unit registry.
///
/// Implementations must enumerate names in a stable order and must be able
/// to return every name they enumerate.
pub trait UnitStore {
    /// Names of all units currently registered, in natural order.
    fn unit_names(&self) -> Vec<String>;
    /// Fetches a unit by name.
    fn unit(&self, name: &str) -> Option<&Unit>;
    /// Removes a unit, returning it if it was present.
    fn remove_unit(&mut self, name: &str) -> Option<Unit>;
}

/// Ordered, in-memory registry of a service's functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionRegistry {
    functions: Vec<Unit>,
}

impl FunctionRegistry {
    /// Adds a function, replacing any existing function with the same name in place.
    pub fn insert(&mut self, unit: Unit) {
        match self.functions.iter_mut().find(|f| f.name == unit.name) {
            Some(existing) => *existing = unit,
            None => self.functions.push(unit),
        }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.functions.iter()
    }

    /// Renders the registry as a JSON object keyed by function name, preserving order.
    pub fn to_json(&self) -> Value {
        let map = self
            .functions
            .iter()
            .map(|unit| (unit.name.clone(), Value::Object(unit.properties.clone())))
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }
}

impl FromIterator<Unit> for FunctionRegistry {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        let mut registry = Self::default();
        for unit in iter {
            registry.insert(unit);
        }
        registry
    }
}

impl UnitStore for FunctionRegistry {
    fn unit_names(&self) -> Vec<String> {
        self.functions.iter().map(|f| f.name.clone()).collect()
    }

    fn unit(&self, name: &str) -> Option<&Unit> {
        self.functions.iter().find(|f| f.name == name)
    }

    fn remove_unit(&mut self, name: &str) -> Option<Unit> {
        let index = self.functions.iter().position(|f| f.name == name)?;
        Some(self.functions.remove(index))
    }
}
