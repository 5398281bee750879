//! Employee, attendance, location and notification commands.

use super::context::AppContext;
use anyhow::{Context, Result};
use hris_infrastructure::services::{
    AvatarUpload, CheckclockService, EmployeeService, LocationInput, LocationService,
    NotificationService,
};
use serde_json::Value;
use std::path::Path;

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list(ctx: &AppContext, items: &[Value]) -> Result<()> {
    if items.is_empty() {
        println!("{}", ctx.tr("common.noData"));
        return Ok(());
    }
    for item in items {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}

pub async fn list_employees(ctx: &AppContext) -> Result<()> {
    let employees = EmployeeService::new(ctx.client.clone()).get_all().await?;
    print_list(ctx, &employees)
}

pub async fn get_employee(ctx: &AppContext, id: &str) -> Result<()> {
    let employee = EmployeeService::new(ctx.client.clone()).get_by_id(id).await?;
    print_json(&employee)
}

pub async fn delete_employee(ctx: &AppContext, id: &str) -> Result<()> {
    EmployeeService::new(ctx.client.clone()).delete(id).await?;
    println!("Deleted employee {}", id);
    Ok(())
}

pub async fn upload_avatar(ctx: &AppContext, id: &str, file: &Path) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("avatar")
        .to_string();
    let avatar = AvatarUpload {
        mime_type: guess_mime_type(file),
        file_name,
        bytes,
    };
    let result = EmployeeService::new(ctx.client.clone())
        .upload_avatar(id, avatar)
        .await?;
    print_json(&result)
}

/// MIME type from the file extension, if it has a known one.
fn guess_mime_type(file: &Path) -> Option<String> {
    mime_guess::from_path(file).first().map(|mime| mime.to_string())
}

pub async fn list_checkclock(ctx: &AppContext, status: Option<&str>) -> Result<()> {
    let items = CheckclockService::new(ctx.client.clone()).list(status).await?;
    print_list(ctx, &items)
}

pub async fn get_checkclock(ctx: &AppContext, id: &str) -> Result<()> {
    let record = CheckclockService::new(ctx.client.clone()).get(id).await?;
    print_json(&record)
}

pub async fn approve(ctx: &AppContext, id: &str) -> Result<()> {
    let record = CheckclockService::new(ctx.client.clone()).approve(id).await?;
    print_json(&record)
}

pub async fn reject(ctx: &AppContext, id: &str, reason: Option<&str>) -> Result<()> {
    let record = CheckclockService::new(ctx.client.clone())
        .reject(id, reason)
        .await?;
    print_json(&record)
}

pub async fn list_locations(ctx: &AppContext) -> Result<()> {
    let locations = LocationService::new(ctx.client.clone()).list().await?;
    print_list(ctx, &locations)
}

pub async fn create_location(ctx: &AppContext, input: &LocationInput) -> Result<()> {
    let created = LocationService::new(ctx.client.clone()).create(input).await?;
    print_json(&created)
}

pub async fn delete_location(ctx: &AppContext, id: &str) -> Result<()> {
    LocationService::new(ctx.client.clone()).delete(id).await?;
    println!("Deleted location {}", id);
    Ok(())
}

pub async fn list_notifications(ctx: &AppContext) -> Result<()> {
    let items = NotificationService::new(ctx.client.clone()).list().await?;
    println!("{} unread", NotificationService::unread_count(&items));
    print_list(ctx, &items)
}

pub async fn mark_read(ctx: &AppContext, id: &str) -> Result<()> {
    NotificationService::new(ctx.client.clone()).mark_read(id).await?;
    Ok(())
}

pub async fn mark_all_read(ctx: &AppContext) -> Result<()> {
    NotificationService::new(ctx.client.clone())
        .mark_all_read()
        .await?;
    Ok(())
}
