//! The dispatcher and public entry points.
//!
//! Each node of a delayed-operation tree is a group tagged with a
//! `delayed_type` of `"array"` or `"operation"` and a subtype name. The
//! dispatcher routes the node to a validator looked up by subtype in one of
//! two registries, both open for extension by the embedding application.

use std::sync::Arc;

use delarray_core::{parse_version_string, ArrayDetails, Version};
use delarray_store::Group;
use indexmap::IndexMap;

use crate::arrays;
use crate::error::ValidationError;
use crate::ops;

/// A validator for one array or operation subtype.
pub type ValidatorFn =
    Arc<dyn Fn(&Group, &Version, &Context<'_>) -> Result<ArrayDetails, ValidationError> + Send + Sync>;

/// An open mapping from subtype names to validators.
///
/// Registries are plain values carried inside [`Options`]: configure them
/// before validation begins, then share the options freely. Nothing is
/// mutated during a validation call.
#[derive(Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, ValidatorFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the validator for a subtype.
    pub fn register(&mut self, name: impl Into<String>, validator: ValidatorFn) {
        self.entries.insert(name.into(), validator);
    }

    /// Removes a subtype; returns `true` if it was registered.
    pub fn deregister(&mut self, name: &str) -> bool {
        self.entries.shift_remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn get(&self, name: &str) -> Option<&ValidatorFn> {
        self.entries.get(name)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Configuration for a validation run.
#[derive(Debug, Clone)]
pub struct Options {
    pub array_registry: Registry,
    pub operation_registry: Registry,
    /// Skip content scans (index bounds, pointer ordering, placeholders,
    /// dimnames) and only recompute each node's type and dimensions. On any
    /// input that passes full validation, the fast path reports identical
    /// details.
    pub details_only: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            array_registry: default_array_registry(),
            operation_registry: default_operation_registry(),
            details_only: false,
        }
    }
}

/// Hook invoked once per visited node with its subtype name. Hooks observe
/// the walk; they cannot alter its outcome.
pub type NodeHook = Box<dyn Fn(&str, &Group, &Version)>;

/// Observation hooks for a validation run.
#[derive(Default)]
pub struct Callbacks {
    pub array: Option<NodeHook>,
    pub operation: Option<NodeHook>,
}

impl Callbacks {
    pub fn on_array(mut self, hook: impl Fn(&str, &Group, &Version) + 'static) -> Self {
        self.array = Some(Box::new(hook));
        self
    }

    pub fn on_operation(mut self, hook: impl Fn(&str, &Group, &Version) + 'static) -> Self {
        self.operation = Some(Box::new(hook));
        self
    }
}

/// Borrowed configuration threaded through the recursive walk.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    options: &'a Options,
    callbacks: Option<&'a Callbacks>,
}

impl<'a> Context<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            callbacks: None,
        }
    }

    pub fn with_callbacks(options: &'a Options, callbacks: &'a Callbacks) -> Self {
        Self {
            options,
            callbacks: Some(callbacks),
        }
    }

    pub fn details_only(&self) -> bool {
        self.options.details_only
    }

    /// Validates one node and recursively everything beneath it.
    pub fn validate(
        &self,
        group: &Group,
        version: &Version,
    ) -> Result<ArrayDetails, ValidationError> {
        if !group.has_attribute("delayed_type") {
            return Err(ValidationError::contract("unknown delayed type"));
        }
        match read_string_attribute(group, "delayed_type")?.as_str() {
            "array" => {
                let subtype = read_string_attribute(group, "delayed_array")?;
                if let Some(hook) = self.callbacks.and_then(|c| c.array.as_ref()) {
                    hook(&subtype, group, version);
                }

                let result = if let Some(validator) = self.options.array_registry.get(&subtype) {
                    validator(group, version, self)
                } else if subtype.starts_with("custom ") {
                    arrays::custom::validate_custom_array(group, version)
                } else if version.lt(1, 1) && subtype.starts_with("external hdf5 ") {
                    arrays::external::validate_external_hdf5_array(group, version)
                } else if version.lt(1, 1) && subtype.starts_with("external ") {
                    arrays::external::validate_external_array(group, version)
                } else {
                    return Err(ValidationError::UnknownArrayType);
                };

                result.map_err(|source| ValidationError::Array {
                    name: subtype,
                    source: Box::new(source),
                })
            }
            "operation" => {
                let subtype = read_string_attribute(group, "delayed_operation")?;
                if let Some(hook) = self.callbacks.and_then(|c| c.operation.as_ref()) {
                    hook(&subtype, group, version);
                }

                let validator = self
                    .options
                    .operation_registry
                    .get(&subtype)
                    .ok_or(ValidationError::UnknownOperationType)?;
                validator(group, version, self).map_err(|source| ValidationError::Operation {
                    name: subtype,
                    source: Box::new(source),
                })
            }
            other => Err(ValidationError::UnknownDelayedType(other.to_string())),
        }
    }
}

fn read_string_attribute(group: &Group, name: &str) -> Result<String, ValidationError> {
    let attr = group.attribute(name)?;
    if !attr.datatype.is_string() {
        return Err(ValidationError::contract(format!(
            "expected '{name}' to use a datatype that can be represented by a UTF-8 encoded string"
        )));
    }
    Ok(attr.read_scalar_string(name)?)
}

/// Reads the schema version declared on a root node. Trees written before
/// versioning existed carry no attribute and get the oldest rules.
pub fn extract_version(group: &Group) -> Result<Version, ValidationError> {
    if !group.has_attribute("delayed_version") {
        return Ok(Version::OLDEST);
    }
    let declared = read_string_attribute(group, "delayed_version")?;
    // The historic three-component literal predates the two-component
    // format and is matched outright.
    if declared == "1.0.0" {
        return Ok(Version::new(1, 0, 0));
    }
    Ok(parse_version_string(&declared)?)
}

/// The built-in array validators.
pub fn default_array_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register("dense array", Arc::new(arrays::dense::validate_dense_array));
    registry.register(
        "sparse matrix",
        Arc::new(arrays::sparse::validate_sparse_matrix),
    );
    registry.register(
        "constant array",
        Arc::new(arrays::constant::validate_constant_array),
    );
    registry
}

/// The built-in operation validators.
pub fn default_operation_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register("subset", Arc::new(ops::subset::validate_subset));
    registry.register("combine", Arc::new(ops::combine::validate_combine));
    registry.register("transpose", Arc::new(ops::transpose::validate_transpose));
    registry.register(
        "dimnames",
        Arc::new(ops::dimnames::validate_dimnames_assignment),
    );
    registry.register(
        "subset assignment",
        Arc::new(ops::subset_assignment::validate_subset_assignment),
    );
    registry.register(
        "unary arithmetic",
        Arc::new(ops::unary::validate_unary_arithmetic),
    );
    registry.register(
        "unary comparison",
        Arc::new(ops::unary::validate_unary_comparison),
    );
    registry.register("unary logic", Arc::new(ops::unary::validate_unary_logic));
    registry.register("unary math", Arc::new(ops::unary_math::validate_unary_math));
    registry.register(
        "unary special check",
        Arc::new(ops::unary::validate_unary_special_check),
    );
    registry.register(
        "binary arithmetic",
        Arc::new(ops::binary::validate_binary_arithmetic),
    );
    registry.register(
        "binary comparison",
        Arc::new(ops::binary::validate_binary_comparison),
    );
    registry.register("binary logic", Arc::new(ops::binary::validate_binary_logic));
    registry.register(
        "matrix product",
        Arc::new(ops::matrix_product::validate_matrix_product),
    );
    registry
}

/// Validates a tree, inferring the version from the root's
/// `delayed_version` attribute.
pub fn validate(group: &Group) -> Result<ArrayDetails, ValidationError> {
    let version = extract_version(group)?;
    validate_with_version(group, &version)
}

/// Validates a tree under an explicit version.
pub fn validate_with_version(
    group: &Group,
    version: &Version,
) -> Result<ArrayDetails, ValidationError> {
    let options = Options::default();
    Context::new(&options).validate(group, version)
}

/// Validates a tree while invoking `callbacks` on every visited node.
pub fn validate_with_callbacks(
    group: &Group,
    version: &Version,
    callbacks: &Callbacks,
) -> Result<ArrayDetails, ValidationError> {
    let options = Options::default();
    Context::with_callbacks(&options, callbacks).validate(group, version)
}

/// Validates a tree under caller-supplied options.
pub fn validate_with_options(
    group: &Group,
    version: &Version,
    options: &Options,
) -> Result<ArrayDetails, ValidationError> {
    Context::new(options).validate(group, version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delarray_core::ArrayType;
    use delarray_store::{Attribute, DataType, Dataset};

    fn dense(shape: Vec<u64>) -> Group {
        Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("array"))
            .with_attribute("delayed_array", Attribute::scalar_string("dense array"))
            .with_dataset("data", Dataset::empty(DataType::I32, shape))
            .with_dataset("native", Dataset::scalar_int(1, DataType::I8))
    }

    #[test]
    fn dispatch_rejects_unknown_tags() {
        let group = Group::new().with_attribute("delayed_type", Attribute::scalar_string("soup"));
        let err = validate(&group).unwrap_err();
        assert_eq!(err.to_string(), "unknown delayed type 'soup'");

        let group = Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("array"))
            .with_attribute("delayed_array", Attribute::scalar_string("mystery array"));
        let err = validate(&group).unwrap_err();
        assert_eq!(err.to_string(), "unknown array type");

        let group = Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("operation"))
            .with_attribute("delayed_operation", Attribute::scalar_string("mystery op"));
        let err = validate(&group).unwrap_err();
        assert_eq!(err.to_string(), "unknown operation type");
    }

    #[test]
    fn failures_are_wrapped_with_the_subtype() {
        let mut group = dense(vec![5]);
        group.remove_child("native");
        let err = validate(&group).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to validate delayed array of type 'dense array'; expected a dataset at 'native'"
        );
    }

    #[test]
    fn version_extraction() {
        let group = dense(vec![5]);
        assert_eq!(extract_version(&group).unwrap(), Version::OLDEST);

        let group =
            dense(vec![5]).with_attribute("delayed_version", Attribute::scalar_string("1.0.0"));
        assert_eq!(extract_version(&group).unwrap(), Version::new(1, 0, 0));

        let group =
            dense(vec![5]).with_attribute("delayed_version", Attribute::scalar_string("1.1"));
        assert_eq!(extract_version(&group).unwrap(), Version::new(1, 1, 0));

        let group = dense(vec![5])
            .with_attribute("delayed_version", Attribute::scalar_int(1, DataType::I32));
        let err = extract_version(&group).unwrap_err();
        assert!(err.to_string().contains("UTF-8 encoded string"));
    }

    #[test]
    fn custom_prefix_falls_back_without_registration() {
        let group = Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("array"))
            .with_attribute("delayed_array", Attribute::scalar_string("custom thing"))
            .with_dataset("dimensions", Dataset::vector_int(vec![50], DataType::I32));
        let details = validate(&group).unwrap();
        assert_eq!(details.array_type, ArrayType::Float);
        assert_eq!(details.dimensions.as_slice(), &[50]);
    }

    #[test]
    fn external_prefixes_are_version_limited() {
        let group = Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("array"))
            .with_attribute("delayed_array", Attribute::scalar_string("external thing"))
            .with_dataset("dimensions", Dataset::vector_int(vec![7], DataType::I32));
        assert!(validate_with_version(&group, &Version::OLDEST).is_ok());

        let err = validate_with_version(&group, &Version::new(1, 1, 0)).unwrap_err();
        assert_eq!(err.to_string(), "unknown array type");
    }

    #[test]
    fn registries_are_extensible() {
        let mut options = Options::default();
        options.array_registry.register(
            "checkerboard",
            Arc::new(|_: &Group, _: &Version, _: &Context<'_>| {
                Ok(ArrayDetails::new(ArrayType::Boolean, [8, 8]))
            }),
        );
        let group = Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("array"))
            .with_attribute("delayed_array", Attribute::scalar_string("checkerboard"));
        let details = validate_with_options(&group, &Version::OLDEST, &options).unwrap();
        assert_eq!(details.dimensions.as_slice(), &[8, 8]);

        assert!(options.array_registry.deregister("checkerboard"));
        let err = validate_with_options(&group, &Version::OLDEST, &options).unwrap_err();
        assert_eq!(err.to_string(), "unknown array type");
    }

    // A three-level tree: transpose of a combine of a dense array and a
    // sparse matrix.
    fn composite_tree() -> Group {
        let sparse = Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("array"))
            .with_attribute("delayed_array", Attribute::scalar_string("sparse matrix"))
            .with_dataset("shape", Dataset::vector_int(vec![20, 10], DataType::I32))
            .with_dataset("data", Dataset::empty(DataType::I32, vec![3]))
            .with_dataset(
                "indices",
                Dataset::vector_int(vec![0, 5, 19], DataType::I32),
            )
            .with_dataset(
                "indptr",
                Dataset::vector_int(
                    vec![0, 1, 1, 2, 2, 2, 2, 2, 2, 2, 3],
                    DataType::I32,
                ),
            );

        let seeds = Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("list"))
            .with_attribute("delayed_length", Attribute::scalar_int(2, DataType::I32))
            .with_group("0", dense(vec![13, 10]))
            .with_group("1", sparse);
        let combine = Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("operation"))
            .with_attribute("delayed_operation", Attribute::scalar_string("combine"))
            .with_dataset("along", Dataset::scalar_int(0, DataType::I32))
            .with_group("seeds", seeds);

        Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("operation"))
            .with_attribute("delayed_operation", Attribute::scalar_string("transpose"))
            .with_group("seed", combine)
            .with_dataset(
                "permutation",
                Dataset::vector_int(vec![1, 0], DataType::I32),
            )
    }

    #[test]
    fn trees_loaded_from_json_validate() {
        let json = serde_json::json!({
            "attributes": {
                "delayed_type": {
                    "datatype": "String", "shape": [], "values": {"Str": ["array"]}
                },
                "delayed_array": {
                    "datatype": "String", "shape": [], "values": {"Str": ["constant array"]}
                }
            },
            "children": {
                "dimensions": {
                    "Dataset": {
                        "datatype": {"Integer": {"width": 32, "signed": true}},
                        "shape": [2],
                        "values": {"Int": [20, 17]}
                    }
                },
                "value": {
                    "Dataset": {
                        "datatype": {"Float": {"width": 64}},
                        "shape": [],
                        "values": {"Float": [2.5]}
                    }
                }
            }
        });
        let tree: Group = serde_json::from_value(json).unwrap();
        let details = validate(&tree).unwrap();
        assert_eq!(details.array_type, ArrayType::Float);
        assert_eq!(details.dimensions.as_slice(), &[20, 17]);
    }

    #[test]
    fn validation_is_deterministic() {
        let tree = composite_tree();
        let first = validate(&tree).unwrap();
        let second = validate(&tree).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.array_type, ArrayType::Integer);
        assert_eq!(first.dimensions.as_slice(), &[10, 33]);
    }

    #[test]
    fn details_only_matches_full_validation_on_passing_input() {
        let tree = composite_tree();
        let full = validate(&tree).unwrap();

        let options = Options {
            details_only: true,
            ..Options::default()
        };
        let fast = validate_with_options(&tree, &Version::OLDEST, &options).unwrap();
        assert_eq!(full, fast);
    }

    #[test]
    fn breadcrumbs_reach_the_failing_leaf() {
        let mut tree = composite_tree();
        let dense_seed = tree
            .open_group_mut("seed")
            .unwrap()
            .open_group_mut("seeds")
            .unwrap()
            .open_group_mut("0")
            .unwrap();
        dense_seed.remove_child("data");

        let message = validate(&tree).unwrap_err().to_string();
        assert!(message.contains("failed to validate delayed operation of type 'transpose'"));
        assert!(message.contains("failed to validate 'seed'"));
        assert!(message.contains("failed to validate 'seeds/0'"));
        assert!(message.contains("expected a dataset at 'data'"));
    }

    #[test]
    fn the_same_defect_reports_differently_across_versions() {
        let mut tree = composite_tree();
        let combine = tree.open_group_mut("seed").unwrap();
        combine.insert_dataset("along", Dataset::scalar_int(-1, DataType::I32));

        let old = validate_with_version(&tree, &Version::OLDEST).unwrap_err();
        assert!(old.to_string().contains("'along' should be non-negative"));

        // Under 1.1 rules the failure moves to the datatype itself. The
        // tree is otherwise rejected later for missing 'type' attributes,
        // but 'along' is checked first.
        let new = validate_with_version(&tree, &Version::new(1, 1, 0)).unwrap_err();
        assert!(new.to_string().contains("64-bit unsigned integer"));
    }

    #[test]
    fn callbacks_observe_every_node() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let root = Group::new()
            .with_attribute("delayed_type", Attribute::scalar_string("operation"))
            .with_attribute("delayed_operation", Attribute::scalar_string("transpose"))
            .with_group("seed", dense(vec![13, 19]))
            .with_dataset(
                "permutation",
                Dataset::vector_int(vec![1, 0], DataType::I32),
            );

        let arrays_seen = Rc::clone(&seen);
        let operations_seen = Rc::clone(&seen);
        let callbacks = Callbacks::default()
            .on_array(move |name, _, _| arrays_seen.borrow_mut().push(format!("array:{name}")))
            .on_operation(move |name, _, _| {
                operations_seen.borrow_mut().push(format!("operation:{name}"))
            });
        validate_with_callbacks(&root, &Version::OLDEST, &callbacks).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec!["operation:transpose".to_string(), "array:dense array".to_string()]
        );
    }
}
