//! Builds binding modules from contract schemas and writes them to disk.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tvm_abi::{AbiContract, AbiFunction, AbiGetter, AbiParam, AbiType};

use crate::error::{GenError, Result};
use crate::ir::{BindingModule, FieldDef, FunctionBinding, GetterBinding, Inputs, Outputs, StructDef};
use crate::logging::{debug, trace};
use crate::mapper::rust_type;
use crate::naming;
use crate::render;

/// File suffix of contract schemas.
pub const ABI_SUFFIX: &str = ".abi.json";

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenOptions {
    /// Crate path generated code imports its runtime prelude from.
    pub runtime_crate: String,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            runtime_crate: "tvm_abi".to_string(),
        }
    }
}

/// Binding generator.
///
/// # Example
///
/// ```ignore
/// use tvm_abi_gen::{GenOptions, Generator};
///
/// let generator = Generator::new(GenOptions::default());
/// let written = generator.generate_to_dir("build", "src/bindings", &[])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GenOptions,
}

impl Generator {
    pub fn new(options: GenOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenOptions {
        &self.options
    }

    /// Resolve every name and type of `abi` into a binding module.
    pub fn module(&self, contract: &str, abi: &AbiContract) -> Result<BindingModule> {
        abi.validate()?;
        let type_name = naming::type_name(contract);
        if type_name.is_empty() || type_name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(GenError::InvalidContractName(contract.to_string()));
        }

        let module = BindingModule {
            contract: type_name.clone(),
            contract_path: contract.to_string(),
            runtime_crate: self.options.runtime_crate.clone(),
            has_constructor: abi.has_constructor(),
            init: struct_def(format!("{type_name}Init"), abi.init_fields())?,
            state: struct_def(format!("{type_name}State"), abi.fields.iter())?,
            functions: abi
                .functions
                .iter()
                .map(function_binding)
                .collect::<Result<_>>()?,
            getters: abi.getters.iter().map(getter_binding).collect::<Result<_>>()?,
        };
        check_collisions(&module)?;
        debug!(
            contract,
            functions = module.functions.len(),
            getters = module.getters.len(),
            "built binding module"
        );
        Ok(module)
    }

    /// Render the Rust source of one contract's bindings.
    pub fn generate(&self, contract: &str, abi: &AbiContract) -> Result<String> {
        Ok(render::rust::render(&self.module(contract, abi)?))
    }

    /// Generate bindings for `contracts` (all schemas in `abi_dir` when empty)
    /// into `out_dir`, together with a `mod.rs` declaring them.
    ///
    /// Returns the written files.
    pub fn generate_to_dir(
        &self,
        abi_dir: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
        contracts: &[String],
    ) -> Result<Vec<PathBuf>> {
        let abi_dir = abi_dir.as_ref();
        let out_dir = out_dir.as_ref();
        let contracts = if contracts.is_empty() {
            discover_contracts(abi_dir)?
        } else {
            contracts.to_vec()
        };

        fs::create_dir_all(out_dir).map_err(|e| GenError::io(out_dir, e))?;
        let mut written = Vec::new();
        let mut modules = Vec::new();
        for contract in &contracts {
            let path = abi_dir.join(format!("{contract}{ABI_SUFFIX}"));
            if !path.is_file() {
                return Err(GenError::MissingAbi {
                    contract: contract.clone(),
                    path,
                });
            }
            let abi = AbiContract::from_file(&path)?;
            let source = self.generate(contract, &abi)?;

            let module = naming::module_name(contract);
            let target = out_dir.join(format!("{}.rs", module.trim_start_matches("r#")));
            fs::write(&target, source).map_err(|e| GenError::io(&target, e))?;
            trace!(contract = %contract, path = %target.display(), "wrote bindings");
            modules.push((module, naming::type_name(contract)));
            written.push(target);
        }

        let index = out_dir.join("mod.rs");
        fs::write(&index, module_index(&modules)).map_err(|e| GenError::io(&index, e))?;
        written.push(index);
        debug!(count = contracts.len(), out_dir = %out_dir.display(), "generated bindings");
        Ok(written)
    }
}

/// Contract names of every schema in `dir`, sorted.
pub fn discover_contracts(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| GenError::io(dir, e))?;
    let mut contracts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GenError::io(dir, e))?;
        if let Some(name) = entry.file_name().to_str().and_then(|n| n.strip_suffix(ABI_SUFFIX))
            && !name.is_empty()
        {
            contracts.push(name.to_string());
        }
    }
    contracts.sort();
    Ok(contracts)
}

fn module_index(modules: &[(String, String)]) -> String {
    let mut w = render::SourceWriter::new();
    w.line("// This file is auto-generated. Do not modify it.");
    w.blank();
    for (module, _) in modules {
        w.line(format!("pub mod {module};"));
    }
    if !modules.is_empty() {
        w.blank();
    }
    for (module, type_name) in modules {
        w.line(format!("pub use {module}::{type_name};"));
    }
    w.finish()
}

fn field_def(param: &AbiParam, ident: String) -> Result<FieldDef> {
    let ty = AbiType::from_param(param)?;
    Ok(FieldDef {
        ident,
        param: param.clone(),
        rust_type: rust_type(&ty),
    })
}

fn struct_def<'a>(name: String, params: impl Iterator<Item = &'a AbiParam>) -> Result<StructDef> {
    let fields = params
        .map(|p| field_def(p, naming::identifier(&p.name)))
        .collect::<Result<Vec<_>>>()?;
    Ok(StructDef { name, fields })
}

fn inputs(params: &[AbiParam], struct_name: String) -> Result<Inputs> {
    Ok(match params {
        [] => Inputs::None,
        [single] => Inputs::Single(field_def(single, naming::argument(&single.name))?),
        many => Inputs::Struct(struct_def(struct_name, many.iter())?),
    })
}

fn function_binding(function: &AbiFunction) -> Result<FunctionBinding> {
    let name = &function.name;
    Ok(FunctionBinding {
        abi_name: name.clone(),
        send: naming::send_method(name),
        body: naming::body_builder(name),
        body_external: naming::external_body_builder(name),
        send_external: naming::external_send_method(name),
        inputs: inputs(
            &function.inputs,
            format!("{}Params", naming::type_name(name)),
        )?,
        deploys: name == "constructor",
    })
}

fn getter_binding(getter: &AbiGetter) -> Result<GetterBinding> {
    let method = naming::get_method(&getter.name);
    let type_name = naming::type_name(&method);
    let outputs = match getter.outputs.as_slice() {
        [] => Outputs::None,
        [single] => Outputs::Single(field_def(single, naming::identifier(&single.name))?),
        many => Outputs::Struct(struct_def(format!("{type_name}Output"), many.iter())?),
    };
    Ok(GetterBinding {
        abi_name: getter.name.clone(),
        inputs: inputs(&getter.inputs, format!("{type_name}Params"))?,
        method,
        outputs,
    })
}

/// Reject schemas whose entries derive the same generated name.
fn check_collisions(module: &BindingModule) -> Result<()> {
    let collision = |name: &str| GenError::NameCollision {
        contract: module.contract_path.clone(),
        name: name.to_string(),
    };

    let mut methods = HashSet::new();
    for name in module.method_names() {
        if !methods.insert(name) {
            return Err(collision(name));
        }
    }

    let mut types = HashSet::from([module.contract.as_str()]);
    for def in module.structs() {
        if !types.insert(def.name.as_str()) {
            return Err(collision(&def.name));
        }
        let mut fields = HashSet::new();
        for field in &def.fields {
            if !fields.insert(field.ident.as_str()) {
                return Err(collision(&format!("{}.{}", def.name, field.ident)));
            }
        }
    }
    Ok(())
}
