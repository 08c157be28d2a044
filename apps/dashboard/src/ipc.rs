//! # JSON-Lines IPC
//!
//! The front-end talks to the app over stdin/stdout, one JSON object per
//! line in each direction.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request  (stdin)                                                       │
//! │    {"id": 3, "cmd": "delete_sale", "args": {"id": "V002"}}              │
//! │    {"id": 4, "cmd": "get_dashboard"}          ◄── no args: omit "args"  │
//! │                                                                         │
//! │  response (stdout, same id, possibly out of order)                      │
//! │    {"id": 3, "ok": true,  "data": {...}}                                │
//! │    {"id": 4, "ok": false, "error": {"code": "UNAUTHENTICATED", ...}}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `id` is echoed back untouched and may be any JSON value. Each request is
//! served on its own task, so a slow `login` or `sync` does not hold up the
//! lines after it.

use std::sync::Arc;

use comptoir_core::export::CsvCollection;
use comptoir_core::validation::QuantityInput;
use comptoir_core::{NewExpense, NewSale, NewStockItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::commands;
use crate::error::ApiError;
use crate::AppContext;

// =============================================================================
// Requests
// =============================================================================

/// A decoded command request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", content = "args", rename_all = "snake_case")]
pub enum Invoke {
    Login {
        email: String,
        password: String,
    },
    Logout,
    CurrentUser,
    GetDashboard,
    ListSales,
    AddSale(NewSale),
    DeleteSale {
        id: String,
    },
    ListExpenses,
    AddExpense(NewExpense),
    DeleteExpense {
        id: String,
    },
    ListStock {
        #[serde(default)]
        search: Option<String>,
    },
    AddStockItem(NewStockItem),
    DeleteStockItem {
        id: String,
    },
    UpdateStockQuantity {
        id: String,
        quantity: QuantityInput,
    },
    GetActivity,
    ExportCsv {
        collection: CsvCollection,
    },
    GetInvoice {
        #[serde(rename = "saleId", alias = "sale_id")]
        sale_id: String,
    },
    Sync,
    GetSyncStatus,
    GetConfig,
}

impl Invoke {
    /// Whether the command is refused while nobody is signed in.
    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            Invoke::Login { .. } | Invoke::CurrentUser | Invoke::GetConfig
        )
    }

    /// Command name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Invoke::Login { .. } => "login",
            Invoke::Logout => "logout",
            Invoke::CurrentUser => "current_user",
            Invoke::GetDashboard => "get_dashboard",
            Invoke::ListSales => "list_sales",
            Invoke::AddSale(_) => "add_sale",
            Invoke::DeleteSale { .. } => "delete_sale",
            Invoke::ListExpenses => "list_expenses",
            Invoke::AddExpense(_) => "add_expense",
            Invoke::DeleteExpense { .. } => "delete_expense",
            Invoke::ListStock { .. } => "list_stock",
            Invoke::AddStockItem(_) => "add_stock_item",
            Invoke::DeleteStockItem { .. } => "delete_stock_item",
            Invoke::UpdateStockQuantity { .. } => "update_stock_quantity",
            Invoke::GetActivity => "get_activity",
            Invoke::ExportCsv { .. } => "export_csv",
            Invoke::GetInvoice { .. } => "get_invoice",
            Invoke::Sync => "sync",
            Invoke::GetSyncStatus => "get_sync_status",
            Invoke::GetConfig => "get_config",
        }
    }
}

/// Decodes one request line into its id and command.
///
/// The id is recovered even when the command is malformed, so the error
/// response can still be matched by the caller.
pub fn decode_request(line: &str) -> (Option<Value>, Result<Invoke, ApiError>) {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => return (None, Err(ApiError::bad_request(format!("Invalid JSON: {}", e)))),
    };

    let id = value.get("id").cloned();
    let invoke = serde_json::from_value::<Invoke>(value)
        .map_err(|e| ApiError::bad_request(format!("Invalid command: {}", e)));

    (id, invoke)
}

// =============================================================================
// Responses
// =============================================================================

/// One response line.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    pub fn from_result(id: Option<Value>, result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Response {
                id,
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Response {
                id,
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(value)?)
}

/// Runs a decoded command against the app state.
pub async fn dispatch(ctx: &AppContext, invoke: Invoke) -> Result<Value, ApiError> {
    if invoke.requires_session() {
        ctx.session.require_user().await?;
    }

    match invoke {
        Invoke::Login { email, password } => {
            to_data(commands::auth::login(&ctx.session, &ctx.ledger, email, password).await?)
        }
        Invoke::Logout => to_data(commands::auth::logout(&ctx.session).await?),
        Invoke::CurrentUser => to_data(commands::auth::current_user(&ctx.session).await),
        Invoke::GetDashboard => to_data(commands::dashboard::get_dashboard(&ctx.ledger)),
        Invoke::GetActivity => to_data(commands::dashboard::get_activity(&ctx.ledger)),
        Invoke::ListSales => to_data(commands::sale::list_sales(&ctx.ledger)),
        Invoke::AddSale(draft) => to_data(commands::sale::add_sale(&ctx.ledger, draft)?),
        Invoke::DeleteSale { id } => to_data(commands::sale::delete_sale(&ctx.ledger, id)?),
        Invoke::ListExpenses => to_data(commands::expense::list_expenses(&ctx.ledger)),
        Invoke::AddExpense(draft) => to_data(commands::expense::add_expense(&ctx.ledger, draft)?),
        Invoke::DeleteExpense { id } => {
            to_data(commands::expense::delete_expense(&ctx.ledger, id)?)
        }
        Invoke::ListStock { search } => to_data(commands::stock::list_stock(&ctx.ledger, search)),
        Invoke::AddStockItem(draft) => {
            to_data(commands::stock::add_stock_item(&ctx.ledger, draft)?)
        }
        Invoke::DeleteStockItem { id } => {
            to_data(commands::stock::delete_stock_item(&ctx.ledger, id)?)
        }
        Invoke::UpdateStockQuantity { id, quantity } => to_data(
            commands::stock::update_stock_quantity(&ctx.ledger, id, quantity)?,
        ),
        Invoke::ExportCsv { collection } => {
            to_data(commands::export::export_csv(&ctx.ledger, collection)?)
        }
        Invoke::GetInvoice { sale_id } => to_data(commands::invoice::get_invoice(
            &ctx.ledger,
            &ctx.config,
            sale_id,
        )?),
        Invoke::Sync => to_data(commands::sync::sync(&ctx.ledger, &ctx.sync).await?),
        Invoke::GetSyncStatus => to_data(commands::sync::get_sync_status(&ctx.sync)),
        Invoke::GetConfig => to_data(commands::config::get_config(&ctx.config)),
    }
}

/// Decodes, dispatches and encodes one request line.
pub async fn handle_line(ctx: &AppContext, line: &str) -> String {
    let (id, invoke) = decode_request(line);

    let result = match invoke {
        Ok(invoke) => {
            debug!(cmd = invoke.name(), "Dispatching");
            dispatch(ctx, invoke).await
        }
        Err(e) => {
            warn!(error = %e, "Rejected request line");
            Err(e)
        }
    };

    encode(&Response::from_result(id, result))
}

fn encode(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        warn!(error = %e, "Could not encode response");
        r#"{"ok":false,"error":{"code":"INTERNAL","message":"Response encoding failed"}}"#
            .to_string()
    })
}

/// Id of a request line, if it has one, without decoding the command.
fn request_id(line: &str) -> Option<Value> {
    serde_json::from_str::<Value>(line)
        .ok()
        .and_then(|value| value.get("id").cloned())
}

/// Runs one request on its own task and answers `INTERNAL` for `id` if that
/// task panics.
pub async fn answer_isolated<F>(id: Option<Value>, task: F) -> String
where
    F: std::future::Future<Output = String> + Send + 'static,
{
    match tokio::spawn(task).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "Command task failed");
            let failure = ApiError::internal("Command failed unexpectedly");
            encode(&Response::from_result(id, Err(failure)))
        }
    }
}

/// Serves requests from `input` until it closes, writing responses to
/// `output`.
///
/// Returns once every in-flight request has been answered.
pub async fn serve<R, W>(ctx: Arc<AppContext>, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let mut lines = BufReader::new(input).lines();

    let reader = async move {
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let ctx = Arc::clone(&ctx);
            let tx = tx.clone();
            tokio::spawn(async move {
                let id = request_id(&line);
                let response =
                    answer_isolated(id, async move { handle_line(&ctx, &line).await }).await;
                // The writer only goes away after every sender is dropped.
                let _ = tx.send(response);
            });
        }
        debug!("Input closed");
        Ok::<(), std::io::Error>(())
    };

    let writer = async {
        while let Some(response) = rx.recv().await {
            output.write_all(response.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        Ok::<(), std::io::Error>(())
    };

    let (read_result, write_result) = tokio::join!(reader, writer);
    read_result?;
    write_result
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use comptoir_core::Money;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> AppContext {
        let config = ConfigState {
            session_path: Some(dir.path().join("session.json")),
            login_delay_ms: 0,
            sync_delay_ms: 0,
            ..ConfigState::default()
        };
        AppContext::new(config, comptoir_core::AppState::demo())
    }

    async fn call(ctx: &AppContext, line: &str) -> Value {
        serde_json::from_str(&handle_line(ctx, line).await).unwrap()
    }

    #[test]
    fn test_decode_unit_and_struct_commands() {
        let (id, invoke) = decode_request(r#"{"id": 1, "cmd": "get_dashboard"}"#);
        assert_eq!(id, Some(Value::from(1)));
        assert_eq!(invoke.unwrap(), Invoke::GetDashboard);

        let (_, invoke) = decode_request(
            r#"{"cmd": "update_stock_quantity", "args": {"id": "P001", "quantity": "7"}}"#,
        );
        assert_eq!(
            invoke.unwrap(),
            Invoke::UpdateStockQuantity {
                id: "P001".to_string(),
                quantity: QuantityInput::from("7"),
            }
        );
    }

    #[test]
    fn test_decode_draft_with_partial_fields() {
        let (_, invoke) =
            decode_request(r#"{"cmd": "add_sale", "args": {"quantity": 2, "unitPrice": 780000}}"#);

        match invoke.unwrap() {
            Invoke::AddSale(draft) => {
                assert_eq!(draft.quantity, Some(2));
                assert_eq!(draft.unit_price, Some(Money::new(780_000)));
                assert!(draft.product_name.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_decode_errors_keep_id() {
        let (id, invoke) = decode_request(r#"{"id": "abc", "cmd": "fly_away"}"#);
        assert_eq!(id, Some(Value::from("abc")));
        assert_eq!(invoke.unwrap_err().code, crate::error::ErrorCode::BadRequest);

        let (id, invoke) = decode_request("not json");
        assert!(id.is_none());
        assert!(invoke.is_err());
    }

    #[test]
    fn test_session_requirements() {
        assert!(!Invoke::GetConfig.requires_session());
        assert!(!Invoke::CurrentUser.requires_session());
        assert!(Invoke::GetDashboard.requires_session());
        assert!(Invoke::Sync.requires_session());
    }

    #[tokio::test]
    async fn test_commands_require_login() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        let response = call(&ctx, r#"{"id": 1, "cmd": "list_sales"}"#).await;
        assert_eq!(response["ok"], false);
        assert_eq!(response["error"]["code"], "UNAUTHENTICATED");

        let response = call(&ctx, r#"{"id": 2, "cmd": "get_config"}"#).await;
        assert_eq!(response["ok"], true);
        assert_eq!(response["data"]["currencySymbol"], "FCFA");
    }

    #[tokio::test]
    async fn test_login_then_mutate() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        let login = call(
            &ctx,
            r#"{"id": 1, "cmd": "login", "args": {"email": "gerant@boutique.cm", "password": "x"}}"#,
        )
        .await;
        assert_eq!(login["data"]["name"], "Jean Dupont");
        assert_eq!(login["data"]["email"], "gerant@boutique.cm");

        let added = call(
            &ctx,
            r#"{"id": 2, "cmd": "add_expense", "args": {"category": "Transport", "amount": 12500}}"#,
        )
        .await;
        assert_eq!(added["ok"], true);
        assert_eq!(added["data"]["items"].as_array().unwrap().len(), 4);
        assert_eq!(
            added["data"]["activity"]["message"],
            "Dépense enregistrée : Transport (12 500 FCFA)"
        );

        let feed = call(&ctx, r#"{"id": 3, "cmd": "get_activity"}"#).await;
        let messages: Vec<_> = feed["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["message"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Dépense enregistrée : Transport (12 500 FCFA)",
                "Session ouverte par Jean Dupont",
                "Système initialisé avec succès",
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        call(&ctx, r#"{"cmd": "login", "args": {"email": "a", "password": "b"}}"#).await;

        let response = call(
            &ctx,
            r#"{"id": 9, "cmd": "add_sale", "args": {"quantity": -2}}"#,
        )
        .await;

        assert_eq!(response["id"], 9);
        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_crashed_command_still_gets_an_answer() {
        let response = answer_isolated(Some(Value::from(7)), async {
            if true {
                panic!("command crashed");
            }
            String::new()
        })
        .await;

        let response: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(response["id"], 7);
        assert_eq!(response["ok"], false);
        assert_eq!(response["error"]["code"], "INTERNAL");
    }

    #[tokio::test]
    async fn test_huge_numbers_do_not_break_the_dashboard() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        call(&ctx, r#"{"cmd": "login", "args": {"email": "a", "password": "b"}}"#).await;

        let update = call(
            &ctx,
            r#"{"id": 1, "cmd": "update_stock_quantity", "args": {"id": "P001", "quantity": "99999999999999999999"}}"#,
        )
        .await;
        assert_eq!(update["ok"], true);

        let dashboard = call(&ctx, r#"{"id": 2, "cmd": "get_dashboard"}"#).await;
        assert_eq!(dashboard["ok"], true);

        let sale = call(
            &ctx,
            r#"{"id": 3, "cmd": "add_sale", "args": {"quantity": 9223372036854775807, "unitPrice": 2}}"#,
        )
        .await;
        assert_eq!(sale["error"]["code"], "VALIDATION_ERROR");

        let sales = call(&ctx, r#"{"id": 4, "cmd": "list_sales"}"#).await;
        assert_eq!(sales["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_serve_answers_every_line() {
        let dir = TempDir::new().unwrap();
        let ctx = Arc::new(context(&dir));

        let input = concat!(
            r#"{"id": 1, "cmd": "get_config"}"#,
            "\n\n",
            r#"{"id": 2, "cmd": "current_user"}"#,
            "\n",
        );
        let mut output = Vec::new();

        serve(ctx, input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l["ok"] == true));
    }
}
