//! Language-neutral description of a binding module.
//!
//! The generator resolves every name and type once into these structures;
//! back ends in [`crate::render`] only print them.

use tvm_abi::AbiParam;

/// One contract's bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingModule {
    /// Rust type name of the contract.
    pub contract: String,
    /// Name passed to the codec service to locate the contract's schema.
    pub contract_path: String,
    /// Crate path the generated code imports its runtime from.
    pub runtime_crate: String,
    /// Whether the schema declares `constructor`; without one a plain
    /// deploy method is emitted.
    pub has_constructor: bool,
    /// Constructor-flagged state fields.
    pub init: StructDef,
    /// All state fields.
    pub state: StructDef,
    pub functions: Vec<FunctionBinding>,
    pub getters: Vec<GetterBinding>,
}

/// A generated struct.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

/// A struct field or positional argument bound to a schema parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub ident: String,
    pub param: AbiParam,
    pub rust_type: String,
}

/// How a method takes its schema inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Inputs {
    None,
    /// A single input is taken as a positional argument.
    Single(FieldDef),
    /// Several inputs are grouped in a `<Name>Params` struct.
    Struct(StructDef),
}

/// How a getter returns its outputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Outputs {
    None,
    Single(FieldDef),
    Struct(StructDef),
}

impl Inputs {
    /// The params struct, when one is generated.
    pub fn struct_def(&self) -> Option<&StructDef> {
        match self {
            Self::Struct(def) => Some(def),
            _ => None,
        }
    }
}

impl Outputs {
    pub fn struct_def(&self) -> Option<&StructDef> {
        match self {
            Self::Struct(def) => Some(def),
            _ => None,
        }
    }
}

/// Methods generated for one schema function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBinding {
    /// Declared function name.
    pub abi_name: String,
    pub send: String,
    pub body: String,
    pub body_external: String,
    pub send_external: String,
    pub inputs: Inputs,
    /// The internal send also carries the client's initial state, so the
    /// message deploys the contract. Set for `constructor`.
    pub deploys: bool,
}

/// Method generated for one schema getter.
#[derive(Debug, Clone, PartialEq)]
pub struct GetterBinding {
    /// Declared getter name, used for the read-only call.
    pub abi_name: String,
    pub method: String,
    pub inputs: Inputs,
    pub outputs: Outputs,
}

impl BindingModule {
    /// Every generated struct, in emission order.
    pub fn structs(&self) -> impl Iterator<Item = &StructDef> {
        [&self.init, &self.state]
            .into_iter()
            .chain(self.functions.iter().filter_map(|f| f.inputs.struct_def()))
            .chain(self.getters.iter().flat_map(|g| {
                g.inputs
                    .struct_def()
                    .into_iter()
                    .chain(g.outputs.struct_def())
            }))
    }

    /// Every generated method name, in emission order.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names = vec!["new", "createFromABI", "getStateVariables"];
        if !self.has_constructor {
            names.push("sendDeploy");
        }
        for function in &self.functions {
            names.extend([
                function.body.as_str(),
                function.send.as_str(),
                function.body_external.as_str(),
                function.send_external.as_str(),
            ]);
        }
        names.extend(self.getters.iter().map(|g| g.method.as_str()));
        names
    }
}
