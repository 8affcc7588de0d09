//! Rust back end: prints a [`BindingModule`] as a source file.
//!
//! Generated methods stay thin. Each one converts its typed arguments with the
//! runtime helpers (`JsonParams`, `encode_arg`, `decode_arg`,
//! `read_state_variables`) and forwards to the codec service or the provider.

use tvm_abi::AbiParam;

use crate::ir::{BindingModule, FieldDef, FunctionBinding, GetterBinding, Inputs, Outputs, StructDef};
use crate::render::writer::SourceWriter;

const BANNER: &[&str] = &[
    "// **********************************************",
    "// This file is auto-generated. Do not modify it.",
    "// **********************************************",
];

/// Render one contract's binding module.
pub fn render(module: &BindingModule) -> String {
    let mut w = SourceWriter::new();
    for line in BANNER {
        w.line(line);
    }
    w.blank();
    w.line("#![allow(non_snake_case, clippy::too_many_arguments)]");
    w.blank();
    w.line(format!("use {}::prelude::*;", module.runtime_crate));

    for def in module.structs() {
        w.blank();
        write_struct(&mut w, def);
    }

    w.blank();
    w.line(format!("/// Client for the `{}` contract.", module.contract_path));
    w.line("#[derive(Debug, Clone, PartialEq)]");
    w.block(format!("pub struct {} {{", module.contract), "}", |w| {
        w.line("pub address: StdAddress,");
        w.line("pub init: Option<StateInit>,");
    });
    w.blank();
    w.block(format!("impl {} {{", module.contract), "}", |w| {
        w.line(format!(
            "pub const CONTRACT_PATH: &str = {:?};",
            module.contract_path
        ));
        w.blank();
        w.block("pub fn new(address: StdAddress) -> Self {", "}", |w| {
            w.line("Self { address, init: None }");
        });
        w.blank();
        write_create(w, module);
        if !module.has_constructor {
            w.blank();
            write_deploy(w);
        }
        w.blank();
        write_state(w, &module.state);
        for function in &module.functions {
            w.blank();
            write_function(w, function);
        }
        for getter in &module.getters {
            w.blank();
            write_getter(w, getter);
        }
    });
    w.finish()
}

/// Constructor expression for a schema parameter.
fn param_expr(param: &AbiParam) -> String {
    let base = format!("AbiParam::new({:?}, {:?})", param.name, param.ty);
    match &param.components {
        Some(components) => {
            let items: Vec<String> = components.iter().map(param_expr).collect();
            format!("{base}.with_components(vec![{}])", items.join(", "))
        }
        None => base,
    }
}

fn write_struct(w: &mut SourceWriter, def: &StructDef) {
    w.line("#[derive(Debug, Clone, PartialEq)]");
    w.block(format!("pub struct {} {{", def.name), "}", |w| {
        for field in &def.fields {
            w.line(format!("pub {}: {},", field.ident, field.rust_type));
        }
    });
}

/// Write `pub async fn` with one argument per line.
fn write_fn(
    w: &mut SourceWriter,
    name: &str,
    args: &[String],
    ret: &str,
    body: impl FnOnce(&mut SourceWriter),
) {
    w.line(format!("pub async fn {name}("));
    w.indented(|w| {
        for arg in args {
            w.line(format!("{arg},"));
        }
    });
    w.block(format!(") -> Result<{ret}> {{"), "}", body);
}

fn input_args(inputs: &Inputs) -> Vec<String> {
    match inputs {
        Inputs::None => Vec::new(),
        Inputs::Single(field) => vec![format!("{}: {}", field.ident, field.rust_type)],
        Inputs::Struct(def) => vec![format!("params: {}", def.name)],
    }
}

fn forward_args(inputs: &Inputs) -> Option<&str> {
    match inputs {
        Inputs::None => None,
        Inputs::Single(field) => Some(&field.ident),
        Inputs::Struct(_) => Some("params"),
    }
}

/// Collect the inputs into a `json` parameter object.
fn write_json_params(w: &mut SourceWriter, inputs: &Inputs) {
    match inputs {
        Inputs::None => w.line("let json = JsonParams::new();"),
        Inputs::Single(field) => {
            w.line("let mut json = JsonParams::new();");
            w.line(format!(
                "json.insert(&{}, {})?;",
                param_expr(&field.param),
                field.ident
            ));
        }
        Inputs::Struct(def) => write_struct_json(w, def, "params"),
    }
}

fn write_struct_json(w: &mut SourceWriter, def: &StructDef, source: &str) {
    if def.fields.is_empty() {
        w.line("let json = JsonParams::new();");
        return;
    }
    w.line("let mut json = JsonParams::new();");
    for field in &def.fields {
        w.line(format!(
            "json.insert(&{}, {source}.{})?;",
            param_expr(&field.param),
            field.ident
        ));
    }
}

fn write_create(w: &mut SourceWriter, module: &BindingModule) {
    let params = if module.init.fields.is_empty() {
        "_params"
    } else {
        "params"
    };
    w.line("/// Compute the address and initial state from constructor-flagged fields.");
    let args = [
        "codec: &dyn AbiCodec".to_string(),
        format!("{params}: {}", module.init.name),
        "code: Cell".to_string(),
        "workchain: i32".to_string(),
    ];
    write_fn(w, "createFromABI", &args, "Self", |w| {
        write_struct_json(w, &module.init, params);
        w.line("let data = codec.build_data(Self::CONTRACT_PATH, &json.into_json()).await?;");
        w.line("let init = StateInit::new(code, data);");
        w.block("Ok(Self {", "})", |w| {
            w.line("address: contract_address(workchain, &init)?,");
            w.line("init: Some(init),");
        });
    });
}

fn write_deploy(w: &mut SourceWriter) {
    w.line("/// Deploy with an empty internal message carrying the initial state.");
    let args = [
        "&self".to_string(),
        "provider: &dyn ContractProvider".to_string(),
        "value: u128".to_string(),
    ];
    write_fn(w, "sendDeploy", &args, "()", |w| {
        w.line("let mut message = InternalMessage::new(value);");
        w.block("if let Some(init) = &self.init {", "}", |w| {
            w.line("message = message.with_init(init.clone());");
        });
        w.line("provider.internal(message).await?;");
        w.line("Ok(())");
    });
}

fn write_state(w: &mut SourceWriter, state: &StructDef) {
    let args = [
        "&self".to_string(),
        "provider: &dyn ContractProvider".to_string(),
        "codec: &dyn AbiCodec".to_string(),
    ];
    write_fn(w, "getStateVariables", &args, &state.name, |w| {
        if state.fields.is_empty() {
            w.line("read_state_variables(provider, codec, Self::CONTRACT_PATH).await?;");
            w.line(format!("Ok({} {{}})", state.name));
            return;
        }
        w.line("let state = read_state_variables(provider, codec, Self::CONTRACT_PATH).await?;");
        w.block(format!("Ok({} {{", state.name), "})", |w| {
            for field in &state.fields {
                w.line(format!(
                    "{}: state.field(&{})?,",
                    field.ident,
                    param_expr(&field.param)
                ));
            }
        });
    });
}

fn write_function(w: &mut SourceWriter, function: &FunctionBinding) {
    let inputs = input_args(&function.inputs);
    let forward = forward_args(&function.inputs);

    let mut args = vec!["codec: &dyn AbiCodec".to_string()];
    args.extend(inputs.iter().cloned());
    write_fn(w, &function.body, &args, "Cell", |w| {
        write_json_params(w, &function.inputs);
        w.line(format!(
            "Ok(codec.internal_body(Self::CONTRACT_PATH, {:?}, &json.into_json()).await?)",
            function.abi_name
        ));
    });

    w.blank();
    let mut args = vec![
        "&self".to_string(),
        "provider: &dyn ContractProvider".to_string(),
        "codec: &dyn AbiCodec".to_string(),
        "value: u128".to_string(),
    ];
    args.extend(inputs.iter().cloned());
    args.push("bounce: Option<bool>".to_string());
    args.push("send_mode: Option<SendMode>".to_string());
    write_fn(w, &function.send, &args, "()", |w| {
        let call_args = match forward {
            Some(arg) => format!("codec, {arg}"),
            None => "codec".to_string(),
        };
        w.line(format!("let body = Self::{}({call_args}).await?;", function.body));
        let binding = if function.deploys { "let mut message" } else { "let message" };
        w.line(format!("{binding} = InternalMessage::new(value)"));
        w.indented(|w| {
            w.line(".with_body(body)");
            w.line(".with_bounce(bounce)");
            w.line(".with_send_mode(send_mode);");
        });
        if function.deploys {
            w.block("if let Some(init) = &self.init {", "}", |w| {
                w.line("message = message.with_init(init.clone());");
            });
        }
        w.line("provider.internal(message).await?;");
        w.line("Ok(())");
    });

    w.blank();
    let mut args = vec![
        "&self".to_string(),
        "codec: &dyn AbiCodec".to_string(),
        "secret_key: &[u8]".to_string(),
        "header: ExternalHeader".to_string(),
    ];
    args.extend(inputs.iter().cloned());
    write_fn(w, &function.body_external, &args, "SignedBody", |w| {
        write_json_params(w, &function.inputs);
        w.line("let json = json.into_json();");
        w.block("let request = ExternalBodyRequest {", "};", |w| {
            w.line("contract: Self::CONTRACT_PATH,");
            w.line(format!("function: {:?},", function.abi_name));
            w.line("address: &self.address,");
            w.line("header: &header,");
            w.line("secret_key,");
            w.line("params: &json,");
        });
        w.line("Ok(codec.external_body(request).await?)");
    });

    w.blank();
    w.line("/// Send the signed external message and return its expiry.");
    let mut args = vec![
        "&self".to_string(),
        "provider: &dyn ContractProvider".to_string(),
        "codec: &dyn AbiCodec".to_string(),
        "secret_key: &[u8]".to_string(),
        "header: ExternalHeader".to_string(),
    ];
    args.extend(inputs);
    write_fn(w, &function.send_external, &args, "u32", |w| {
        let call_args = match forward {
            Some(arg) => format!("codec, secret_key, header, {arg}"),
            None => "codec, secret_key, header".to_string(),
        };
        w.line(format!(
            "let signed = self.{}({call_args}).await?;",
            function.body_external
        ));
        w.line("provider.external(signed.message).await?;");
        w.line("Ok(signed.expire_at)");
    });
}

fn write_getter(w: &mut SourceWriter, getter: &GetterBinding) {
    let uses_codec =
        !matches!(getter.inputs, Inputs::None) || !matches!(getter.outputs, Outputs::None);
    let codec = if uses_codec { "codec" } else { "_codec" };

    let mut args = vec![
        "&self".to_string(),
        "provider: &dyn ContractProvider".to_string(),
        format!("{codec}: &dyn AbiCodec"),
    ];
    args.extend(input_args(&getter.inputs));
    let ret = match &getter.outputs {
        Outputs::None => "()",
        Outputs::Single(field) => field.rust_type.as_str(),
        Outputs::Struct(def) => def.name.as_str(),
    };

    write_fn(w, &getter.method, &args, ret, |w| {
        let encode = |field: &FieldDef, source: &str| {
            format!(
                "encode_arg(codec, &{}, {source}).await?,",
                param_expr(&field.param)
            )
        };
        match &getter.inputs {
            Inputs::None => w.line("let args = Vec::new();"),
            Inputs::Single(field) => {
                w.block("let args = vec![", "];", |w| w.line(encode(field, &field.ident)));
            }
            Inputs::Struct(def) => {
                w.block("let args = vec![", "];", |w| {
                    for field in &def.fields {
                        w.line(encode(field, &format!("params.{}", field.ident)));
                    }
                });
            }
        }

        let call = format!("provider.get({:?}, args).await?;", getter.abi_name);
        let decode = |field: &FieldDef| {
            format!(
                "decode_arg(codec, &{}, &mut stack).await",
                param_expr(&field.param)
            )
        };
        match &getter.outputs {
            Outputs::None => {
                w.line(call);
                w.line("Ok(())");
            }
            Outputs::Single(field) => {
                w.line(format!("let mut stack = {call}"));
                w.line(decode(field));
            }
            Outputs::Struct(def) => {
                w.line(format!("let mut stack = {call}"));
                w.block(format!("Ok({} {{", def.name), "})", |w| {
                    for field in &def.fields {
                        w.line(format!("{}: {}?,", field.ident, decode(field)));
                    }
                });
            }
        }
    });
}
