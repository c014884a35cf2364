//! RPC method handler for the JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested. `handle_method`
//! dispatches a method call to the collection manager and its collaborators
//! held by [`App`].

use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::services::add_bookmark_flow::AddBookmarkFlow;
use crate::services::collection_serializer::MergeReport;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::view_engine::{ViewEngine, ViewEngineTrait};
use crate::types::bookmark::Bookmark;
use crate::types::collection::{SortOrder, DEFAULT_CATEGORY};
use crate::types::identifier::ExtensionId;

fn str_param<'p>(params: &'p Value, key: &str) -> Result<&'p str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn id_param(params: &Value) -> Result<ExtensionId, String> {
    ExtensionId::parse(str_param(params, "id")?).map_err(|e| e.to_string())
}

fn bookmark_json(bookmark: &Bookmark) -> Value {
    let mut value = serde_json::to_value(bookmark).unwrap_or(Value::Null);
    if let Some(map) = value.as_object_mut() {
        map.insert("marketplaceUrl".to_string(), json!(bookmark.id.marketplace_url()));
    }
    value
}

fn bookmarks_json(bookmarks: &[&Bookmark]) -> Value {
    Value::Array(bookmarks.iter().map(|b| bookmark_json(b)).collect())
}

fn report_json(report: &MergeReport) -> Value {
    json!({
        "categoriesAdded": report.categories_added,
        "tagsAdded": report.tags_added,
        "bookmarksAdded": report.bookmarks_added,
        "bookmarksSkipped": report.bookmarks_skipped,
    })
}

/// Runs the add-bookmark flow, releasing the lock while the resolver is awaited.
async fn add_bookmark(app: &Mutex<App>, params: &Value) -> Result<Value, String> {
    let identifier = params.get("identifier").and_then(|v| v.as_str());
    let category = params
        .get("category")
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_CATEGORY);

    let (flow, resolver) = {
        let a = app.lock().map_err(|e| e.to_string())?;
        let collection = a.manager.collection();
        let flow = AddBookmarkFlow::start()
            .submit_identifier(identifier, collection)
            .and_then(|f| f.submit_category(Some(category), collection))
            .map_err(|e| e.to_string())?;
        (flow, a.resolver.clone())
    };
    if flow == AddBookmarkFlow::Cancelled {
        return Ok(json!({"cancelled": true}));
    }

    let flow = flow.resolve(resolver.as_ref()).await.map_err(|e| e.to_string())?;

    let mut a = app.lock().map_err(|e| e.to_string())?;
    match flow.commit(&mut a.manager).map_err(|e| e.to_string())? {
        AddBookmarkFlow::Done(bookmark) => Ok(bookmark_json(&bookmark)),
        other => Err(format!("add bookmark ended in unexpected state: {:?}", other)),
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmarks ───
        "bookmark.add" => add_bookmark(app, params).await,
        "bookmark.remove" => {
            let id = id_param(params)?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let removed = a.manager.remove_bookmark(&id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "id": removed.id.to_string()}))
        }
        "bookmark.find" => {
            let id = id_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let bookmark = a.manager.find_bookmark(&id).map_err(|e| e.to_string())?;
            Ok(bookmark_json(bookmark))
        }
        "bookmark.details" => {
            let id = id_param(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let bookmark = a.manager.find_bookmark(&id).map_err(|e| e.to_string())?;
            Ok(json!({"text": ViewEngine::render_details(bookmark)}))
        }
        "bookmark.list" => {
            let category = str_param(params, "category")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(bookmarks_json(&a.manager.view().list_bookmarks(category)))
        }
        "bookmark.listAll" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(bookmarks_json(&a.manager.view().list_all()))
        }
        "bookmark.search" => {
            let query = str_param(params, "query")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(bookmarks_json(&a.manager.view().search(query)))
        }
        "bookmark.filterByTag" => {
            let tag = str_param(params, "tag")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let view = a.manager.view();
            let tagged = view.filter_by_tag(tag).map_err(|e| e.to_string())?;
            Ok(bookmarks_json(&tagged))
        }
        "bookmark.setCategory" => {
            let id = id_param(params)?;
            let category = str_param(params, "category")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let changed = a.manager.set_category(&id, category).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "changed": changed}))
        }
        "bookmark.attachTag" => {
            let id = id_param(params)?;
            let tag = str_param(params, "tag")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.manager.attach_tag(&id, tag).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.detachTag" => {
            let id = id_param(params)?;
            let tag = str_param(params, "tag")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.manager.detach_tag(&id, tag).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.setNote" => {
            let id = id_param(params)?;
            let text = str_param(params, "text")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.manager.set_note(&id, text).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.clearNote" => {
            let id = id_param(params)?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.manager.clear_note(&id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Categories ───
        "category.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let summary: Vec<Value> = a
                .manager
                .view()
                .category_summary()
                .into_iter()
                .map(|c| json!({"name": c.name, "count": c.count}))
                .collect();
            Ok(json!(summary))
        }
        "category.add" => {
            let name = str_param(params, "name")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let added = a.manager.add_category(name).map_err(|e| e.to_string())?;
            Ok(json!({"name": added}))
        }
        "category.rename" => {
            let old = str_param(params, "old")?;
            let new = str_param(params, "new")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let moved = a.manager.rename_category(old, new).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "moved": moved}))
        }
        "category.remove" => {
            let name = str_param(params, "name")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let reassigned = a.manager.remove_category(name).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "reassigned": reassigned}))
        }

        // ─── Tags ───
        "tag.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!(a.manager.view().list_tags()))
        }
        "tag.add" => {
            let name = str_param(params, "name")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let added = a.manager.add_tag(name).map_err(|e| e.to_string())?;
            Ok(json!({"name": added}))
        }
        "tag.rename" => {
            let old = str_param(params, "old")?;
            let new = str_param(params, "new")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let touched = a.manager.rename_tag(old, new).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "touched": touched}))
        }
        "tag.remove" => {
            let name = str_param(params, "name")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let touched = a.manager.remove_tag(name).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "touched": touched}))
        }

        // ─── Sort order ───
        "sort.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"order": a.manager.sort_order().as_str()}))
        }
        "sort.set" => {
            let order = SortOrder::from_str(str_param(params, "order")?)?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.manager.set_sort_order(order).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "order": order.as_str()}))
        }

        // ─── Export / import ───
        "collection.export" => {
            let path = str_param(params, "path")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let snapshot = a
                .manager
                .export_to_file(&a.files, Path::new(path))
                .map_err(|e| e.to_string())?;
            Ok(json!({
                "ok": true,
                "categories": snapshot.categories.len(),
                "bookmarks": snapshot.bookmarks.len(),
                "tags": snapshot.tags.len(),
            }))
        }
        "collection.import" => {
            let mut guard = app.lock().map_err(|e| e.to_string())?;
            let a = &mut *guard;
            let report = match params.get("snapshot") {
                Some(snapshot) => a.manager.import_value(snapshot),
                None => {
                    let path = str_param(params, "path")?;
                    a.manager.import_from_file(&a.files, Path::new(path))
                }
            }
            .map_err(|e| e.to_string())?;
            Ok(report_json(&report))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
