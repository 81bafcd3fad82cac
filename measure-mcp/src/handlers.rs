//! Request dispatch: lifecycle, tools and resources

use measure_core::{MeasureError, SameUnitPolicy, Settings, Value};
use measure_plugin::{EvalContext, PluginRegistry};
use measure_units::{
    parse_category, parse_quantity, parse_unit, units_registry, Category, Conversion,
    ConversionError, ConversionRequest, Converter, RatioLookup, Unit,
};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::protocol::{McpError, McpRequest, McpResponse, PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};

const RESOURCE_PREFIX: &str = "measure://units/";

pub struct Server {
    registry: Arc<PluginRegistry>,
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self {
            registry: Arc::new(units_registry()),
            settings,
        }
    }

    /// Handle one line of input. `None` means nothing is written back:
    /// blank lines and notifications.
    pub fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        debug!(bytes = line.len(), "received");

        let request = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("error parsing request: {}", e);
                return Some(McpResponse::failure(Some(JsonValue::Null), McpError::parse_error(e)));
            }
        };

        debug!(method = %request.method, "processing");
        let response = self.handle_request(&request);

        if request.is_notification() {
            debug!(method = %request.method, "notification processed");
            return None;
        }
        Some(response)
    }

    pub fn handle_request(&self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => Ok(tools_list()),
            "tools/call" => self.handle_tool_call(&request.params),

            // Resources
            "resources/list" => Ok(resources_list()),
            "resources/read" => handle_resources_read(&request.params),

            _ => Err(McpError::method_not_found(&request.method)),
        };

        match result {
            Ok(r) => McpResponse::success(request.id.clone(), r),
            Err(e) => {
                warn!(method = %request.method, code = e.code, "{}", e.message);
                McpResponse::failure(request.id.clone(), e)
            }
        }
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));
        debug!(tool = name, "tool call");

        match name {
            "convert" => self.tool_convert(&args),
            "convert_batch" => self.tool_convert_batch(&args),
            "call" => self.tool_call(&args),
            "list_units" => tool_list_units(&args),
            "help" => self.tool_help(&args),
            "list_functions" => self.tool_list_functions(&args),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    /// Settings for this call: server defaults plus the optional `same_unit` override
    fn converter_for(&self, args: &JsonValue) -> Result<Converter, McpError> {
        let mut converter = Converter::from_settings(&self.settings);
        if let Some(raw) = arg_str(args, "same_unit") {
            let policy: SameUnitPolicy = raw.parse().map_err(McpError::invalid_params)?;
            converter = converter.with_policy(policy);
        }
        Ok(converter)
    }

    fn tool_convert(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let raw = args
            .get("value")
            .ok_or_else(|| McpError::invalid_params("Missing value argument"))?;
        let to = required_str(args, "to_unit")?;
        let converter = self.converter_for(args)?;

        // "value" is either a number with from_unit, or a quantity such as "10 km"
        let source = match (json_number(raw), arg_str(args, "from_unit")) {
            (Some(value), Some(from)) => parse_unit(from).map(|unit| (value, unit)),
            (Some(_), None) => return Err(McpError::invalid_params("Missing from_unit argument")),
            (None, Some(_)) if raw.is_string() => {
                return Err(McpError::invalid_params("from_unit must be omitted when value is a quantity"))
            }
            (None, _) => match raw.as_str() {
                Some(text) => parse_quantity(text),
                None => {
                    return Err(McpError::invalid_params(format!("value must be a number, got {}", raw)))
                }
            },
        };

        let outcome = source
            .and_then(|(value, from)| build_request(value, from, to, arg_str(args, "category")))
            .and_then(|request| converter.convert(&request));

        Ok(match outcome {
            Ok(conversion) => conversion_json(&conversion),
            Err(e) => {
                warn!(value = %raw, to, "conversion refused: {}", e);
                tool_error(e.into())
            }
        })
    }

    fn tool_convert_batch(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let values = args
            .get("values")
            .and_then(|v| v.as_array())
            .ok_or_else(|| McpError::invalid_params("Missing values"))?;
        let from = required_str(args, "from_unit")?;
        let to = required_str(args, "to_unit")?;
        let category = arg_str(args, "category");
        let converter = self.converter_for(args)?;

        let mut lines = Vec::with_capacity(values.len());
        let mut results = Vec::with_capacity(values.len());
        let mut failures = 0;

        for (i, raw) in values.iter().enumerate() {
            let outcome = json_number(raw)
                .ok_or_else(|| MeasureError::parse_error(format!("'{}' is not a number", raw)))
                .and_then(|value| {
                    parse_unit(from)
                        .and_then(|from| build_request(value, from, to, category))
                        .and_then(|request| converter.convert(&request))
                        .map_err(MeasureError::from)
                });

            match outcome {
                Ok(conversion) => {
                    lines.push(conversion.to_string());
                    results.push(json!({
                        "index": i,
                        "value": conversion.request.value,
                        "result": conversion.result,
                        "text": conversion.to_string(),
                    }));
                }
                Err(e) => {
                    failures += 1;
                    lines.push(format!("#{}: {}", i, e.message));
                    results.push(json!({ "index": i, "value": raw, "error": e }));
                }
            }
        }

        Ok(json!({
            "content": [{ "type": "text", "text": lines.join("\n") }],
            "results": results,
            "isError": failures > 0 && failures == values.len()
        }))
    }

    /// Invoke any registered function with positional arguments
    fn tool_call(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let function = required_str(args, "function")?;
        let call_args: Vec<Value> = args
            .get("args")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().map(Value::from_json).collect())
            .unwrap_or_default();

        let ctx = EvalContext::new(self.registry.clone()).with_settings(self.settings);
        let result = self.registry.call_function(function, &call_args, &ctx);

        Ok(match result {
            Value::Error(e) => tool_error(e),
            value => json!({
                "content": [{ "type": "text", "text": value.to_string() }],
                "data": value.to_json(),
                "isError": false
            }),
        })
    }

    fn tool_help(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let help = self.registry.help(arg_str(args, "name"));
        Ok(json!({
            "content": [{ "type": "text", "text": format_help(&help) }],
            "data": help.to_json()
        }))
    }

    fn tool_list_functions(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let functions = self.registry.list_functions(arg_str(args, "category"));
        let names: Vec<String> = functions
            .as_list()
            .unwrap_or(&[])
            .iter()
            .filter_map(|f| f.as_object().and_then(|o| o.get("usage")).map(|u| u.to_string()))
            .collect();
        Ok(json!({
            "content": [{ "type": "text", "text": names.join("\n") }],
            "data": functions.to_json()
        }))
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Length, weight and temperature unit conversion"
        },
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false }
        },
        "instructions": "Use 'convert' to convert a non-negative value between two units of the same category (Length, Weight, Temperature). Use 'list_units' to see valid unit names. Show the returned text to the user as-is."
    }))
}

fn tools_list() -> JsonValue {
    let unit_props = json!({
        "value": {
            "type": ["number", "string"],
            "description": "Non-negative value, or a quantity like \"10 km\" when from_unit is omitted"
        },
        "from_unit": { "type": "string", "description": "Source unit, e.g. \"Meters\" or \"km\"" },
        "to_unit": { "type": "string", "description": "Target unit, e.g. \"Feet\" or \"mi\"" },
        "category": {
            "type": "string",
            "description": "Optional; inferred from from_unit",
            "enum": ["Length", "Weight", "Temperature"]
        },
        "same_unit": {
            "type": "string",
            "description": "What to do when from_unit equals to_unit (default from server config)",
            "enum": ["reject", "identity"]
        }
    });

    let mut batch_props = unit_props.clone();
    if let Some(obj) = batch_props.as_object_mut() {
        obj.remove("value");
        obj.insert(
            "values".to_string(),
            json!({ "type": "array", "items": { "type": ["number", "string"] }, "description": "Values to convert" }),
        );
    }

    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value between two units and return \"{value} {from} = {result} {to}\".",
                "inputSchema": {
                    "type": "object",
                    "properties": unit_props,
                    "required": ["value", "to_unit"]
                }
            },
            {
                "name": "convert_batch",
                "description": "Convert several values between the same pair of units.",
                "inputSchema": {
                    "type": "object",
                    "properties": batch_props,
                    "required": ["values", "from_unit", "to_unit"]
                }
            },
            {
                "name": "call",
                "description": "Call a conversion function by name with positional arguments.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "function": { "type": "string", "description": "Function name, see list_functions" },
                        "args": { "type": "array", "description": "Positional arguments" }
                    },
                    "required": ["function"]
                }
            },
            {
                "name": "list_units",
                "description": "List units with their symbols and multipliers.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": ["Length", "Weight", "Temperature"]
                        }
                    }
                }
            },
            {
                "name": "help",
                "description": "Get documentation for a function, or general help.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Function name. Omit for general help." }
                    }
                }
            },
            {
                "name": "list_functions",
                "description": "List available functions.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "description": "Filter: units" }
                    }
                }
            }
        ]
    })
}

fn tool_list_units(args: &JsonValue) -> Result<JsonValue, McpError> {
    let categories = match arg_str(args, "category") {
        Some(raw) => vec![parse_category(raw).map_err(|e| McpError::invalid_params(e.to_string()))?],
        None => Category::ALL.to_vec(),
    };

    let tables: Vec<JsonValue> = categories.iter().map(|c| unit_table(*c)).collect();
    let text = categories
        .iter()
        .map(|c| {
            let names: Vec<&str> = c.units().iter().map(|u| u.name()).collect();
            format!("{}: {}", c, names.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "categories": tables
    }))
}

fn unit_table(category: Category) -> JsonValue {
    let table = category.ratio_table();
    let units: Vec<JsonValue> = category
        .units()
        .iter()
        .map(|u| {
            json!({
                "name": u.name(),
                "symbol": u.symbol(),
                "multiplier": table.and_then(|t| t.ratio(*u)),
            })
        })
        .collect();

    json!({
        "category": category.name(),
        "reference": category.reference_unit().name(),
        "units": units
    })
}

fn resources_list() -> JsonValue {
    let resources: Vec<JsonValue> = Category::ALL
        .iter()
        .map(|c| {
            json!({
                "uri": format!("{}{}", RESOURCE_PREFIX, c.name().to_lowercase()),
                "name": c.name(),
                "description": format!("{} units and multipliers", c),
                "mimeType": "application/json"
            })
        })
        .collect();

    json!({ "resources": resources })
}

fn handle_resources_read(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let uri = params
        .as_ref()
        .and_then(|p| p.get("uri"))
        .and_then(|u| u.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing uri parameter"))?;

    let name = uri.strip_prefix(RESOURCE_PREFIX).ok_or_else(|| {
        McpError::invalid_params(format!("Invalid URI: {}. Expected {}{{category}}", uri, RESOURCE_PREFIX))
    })?;

    let category = parse_category(name).map_err(|e| {
        McpError::invalid_params(e.to_string())
            .with_data(json!({ "available": ["length", "weight", "temperature"] }))
    })?;

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": "application/json",
            "text": unit_table(category).to_string()
        }]
    }))
}

fn build_request(
    value: f64,
    from: Unit,
    to: &str,
    category: Option<&str>,
) -> Result<ConversionRequest, ConversionError> {
    let to = parse_unit(to)?;
    let category = match category {
        Some(raw) => parse_category(raw)?,
        None => Category::of(from),
    };
    ConversionRequest::new(category, value, from, to)
}

fn conversion_json(conversion: &Conversion) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": conversion.to_string() }],
        "result": conversion.result,
        "rounded": conversion.rounded(),
        "category": conversion.request.category,
        "from": conversion.request.from,
        "to": conversion.request.to,
        "isError": false
    })
}

fn tool_error(err: MeasureError) -> JsonValue {
    let text = match &err.suggestion {
        Some(s) => format!("{} ({})", err.message, s),
        None => err.message.clone(),
    };
    json!({
        "content": [{ "type": "text", "text": text }],
        "error": err,
        "isError": true
    })
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") {
                out.push_str(&format!("# {}\n\n", n));
            }
            if let Some(Value::Text(d)) = map.get("description") {
                out.push_str(&format!("{}\n\n", d));
            }
            if let Some(Value::Text(u)) = map.get("usage") {
                out.push_str(&format!("**Usage:** `{}`\n\n", u));
            }
            if let Some(Value::Object(funcs)) = map.get("functions") {
                let mut cats: Vec<_> = funcs.iter().collect();
                cats.sort_by(|a, b| a.0.cmp(b.0));
                for (cat, names) in cats {
                    out.push_str(&format!("**{}:** {}\n", cat, names));
                }
            }
            out
        }
        Value::Error(e) => format!("Error: {}", e.message),
        other => other.to_string(),
    }
}

fn arg_str<'a>(args: &'a JsonValue, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

fn required_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    arg_str(args, key).ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", key)))
}

/// JSON number, or a string holding one
fn json_number(v: &JsonValue) -> Option<f64> {
    match v {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Server {
        Server::new(Settings::default())
    }

    fn request(raw: JsonValue) -> McpRequest {
        serde_json::from_value(raw).unwrap()
    }

    fn call_tool(server: &Server, name: &str, arguments: JsonValue) -> JsonValue {
        let req = request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }));
        let resp = server.handle_request(&req);
        assert!(resp.error.is_none(), "unexpected protocol error: {:?}", resp.error);
        resp.result.unwrap()
    }

    #[test]
    fn test_initialize_echoes_protocol() {
        let req = request(json!({
            "jsonrpc": "2.0", "id": 0, "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "clientInfo": { "name": "test" } }
        }));
        let result = server().handle_request(&req).result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn test_unknown_method() {
        let req = request(json!({"jsonrpc": "2.0", "id": 2, "method": "prompts/list"}));
        let resp = server().handle_request(&req);
        assert_eq!(resp.error.map(|e| e.code), Some(crate::protocol::METHOD_NOT_FOUND));
    }

    #[test]
    fn test_tools_list_names() {
        let tools = tools_list();
        let names: Vec<&str> = tools["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(names, ["convert", "convert_batch", "call", "list_units", "help", "list_functions"]);
    }

    #[test]
    fn test_convert_tool() {
        let result = call_tool(&server(), "convert", json!({
            "value": 10, "from_unit": "Kilometers", "to_unit": "Miles"
        }));
        assert_eq!(result["content"][0]["text"], "10.0 Kilometers = 6.2137 Miles");
        assert_eq!(result["rounded"], 6.2137);
        assert_eq!(result["category"], "Length");
        assert_eq!(result["isError"], false);
    }

    #[test]
    fn test_convert_tool_accepts_numeric_string() {
        let result = call_tool(&server(), "convert", json!({
            "value": "212", "from_unit": "F", "to_unit": "C"
        }));
        assert_eq!(result["content"][0]["text"], "212.0 Fahrenheit = 100.0000 Celsius");
    }

    #[test]
    fn test_convert_tool_quantity() {
        let result = call_tool(&server(), "convert", json!({ "value": "10 km", "to_unit": "mi" }));
        assert_eq!(result["content"][0]["text"], "10.0 Kilometers = 6.2137 Miles");

        let result = call_tool(&server(), "convert", json!({ "value": "ten km", "to_unit": "mi" }));
        assert_eq!(result["error"]["code"], "PARSE_ERROR");
    }

    #[test]
    fn test_convert_tool_quantity_with_from_unit() {
        let req = request(json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools/call",
            "params": {
                "name": "convert",
                "arguments": { "value": "10 km", "from_unit": "Miles", "to_unit": "m" }
            }
        }));
        let resp = server().handle_request(&req);
        let err = resp.error.unwrap();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
        assert!(err.message.contains("from_unit"));

        // numeric text is still a plain value
        let result = call_tool(&server(), "convert", json!({
            "value": "10", "from_unit": "km", "to_unit": "m"
        }));
        assert_eq!(result["result"], 10000.0);
    }

    #[test]
    fn test_convert_tool_overflow_is_error() {
        let result = call_tool(&server(), "convert", json!({
            "value": 1e306, "from_unit": "km", "to_unit": "mm"
        }));
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "DOMAIN_ERROR");
    }

    #[test]
    fn test_handle_line_parse_error() {
        let resp = server().handle_line("{not json").unwrap();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"]["code"], crate::protocol::PARSE_ERROR);
        assert_eq!(json.get("id"), Some(&JsonValue::Null));
    }

    #[test]
    fn test_handle_line_skips_notifications_and_blanks() {
        let server = server();
        assert!(server.handle_line(r#"{"jsonrpc":"2.0","method":"initialized"}"#).is_none());
        assert!(server.handle_line("").is_none());
        assert!(server.handle_line("   \n").is_none());
    }

    #[test]
    fn test_handle_line_answers_requests() {
        let server = server();
        let resp = server.handle_line(r#"{"jsonrpc":"2.0","id":9,"method":"ping"}"#).unwrap();
        assert_eq!(resp.id, Some(json!(9)));
        assert!(resp.error.is_none());

        let resp = server.handle_line(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert_eq!(resp.id, Some(JsonValue::Null));
    }

    #[test]
    fn test_convert_tool_same_unit() {
        let args = json!({ "value": 5, "from_unit": "Meters", "to_unit": "Meters" });
        let rejected = call_tool(&server(), "convert", args.clone());
        assert_eq!(rejected["isError"], true);
        assert_eq!(rejected["error"]["code"], "SAME_UNIT");
        assert_eq!(rejected["error"]["severity"], "warning");

        let mut identity_args = args;
        identity_args["same_unit"] = json!("identity");
        let passed = call_tool(&server(), "convert", identity_args);
        assert_eq!(passed["result"], 5.0);

        let identity_server = Server::new(Settings::default().with_same_unit(SameUnitPolicy::Identity));
        let passed = call_tool(&identity_server, "convert", json!({
            "value": 5, "from_unit": "Meters", "to_unit": "Meters"
        }));
        assert_eq!(passed["isError"], false);
    }

    #[test]
    fn test_convert_tool_errors() {
        let result = call_tool(&server(), "convert", json!({
            "value": 1, "from_unit": "kg", "to_unit": "ft"
        }));
        assert_eq!(result["error"]["code"], "INVALID_UNIT");

        let result = call_tool(&server(), "convert", json!({
            "value": -4, "from_unit": "kg", "to_unit": "g"
        }));
        assert_eq!(result["error"]["code"], "DOMAIN_ERROR");

        let req = request(json!({
            "jsonrpc": "2.0", "id": 3, "method": "tools/call",
            "params": { "name": "convert", "arguments": { "from_unit": "kg", "to_unit": "g" } }
        }));
        let resp = server().handle_request(&req);
        assert_eq!(resp.error.map(|e| e.code), Some(crate::protocol::INVALID_PARAMS));
    }

    #[test]
    fn test_convert_batch() {
        let result = call_tool(&server(), "convert_batch", json!({
            "values": [0, 100, "oops"], "from_unit": "C", "to_unit": "F"
        }));
        let results = result["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["result"], 32.0);
        assert_eq!(results[1]["result"], 212.0);
        assert_eq!(results[2]["error"]["code"], "PARSE_ERROR");
        assert_eq!(result["isError"], false);
    }

    #[test]
    fn test_call_tool_routes_to_registry() {
        let result = call_tool(&server(), "call", json!({
            "function": "describe", "args": [1, "Kilograms", "Pounds"]
        }));
        assert_eq!(result["content"][0]["text"], "1.0 Kilograms = 2.2046 Pounds");

        let result = call_tool(&server(), "call", json!({ "function": "nope" }));
        assert_eq!(result["error"]["code"], "UNDEFINED_FUNC");
    }

    #[test]
    fn test_list_units() {
        let result = call_tool(&server(), "list_units", json!({ "category": "weight" }));
        let table = &result["categories"][0];
        assert_eq!(table["reference"], "Kilograms");
        assert_eq!(table["units"][3]["name"], "Pounds");
        assert_eq!(table["units"][3]["multiplier"], 2.20462);

        let all = call_tool(&server(), "list_units", json!({}));
        assert_eq!(all["categories"].as_array().map(|a| a.len()), Some(3));
        assert!(all["categories"][2]["units"][0]["multiplier"].is_null());
    }

    #[test]
    fn test_help_tool() {
        let result = call_tool(&server(), "help", json!({ "name": "convert" }));
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("# convert"));
    }

    #[test]
    fn test_resources() {
        let list = resources_list();
        assert_eq!(list["resources"][0]["uri"], "measure://units/length");

        let read = handle_resources_read(&Some(json!({ "uri": "measure://units/temperature" }))).unwrap();
        let text = read["contents"][0]["text"].as_str().unwrap();
        let table: JsonValue = serde_json::from_str(text).unwrap();
        assert_eq!(table["category"], "Temperature");

        assert!(handle_resources_read(&Some(json!({ "uri": "measure://units/volume" }))).is_err());
        assert!(handle_resources_read(&Some(json!({ "uri": "file:///tmp/units.json" }))).is_err());
    }
}
