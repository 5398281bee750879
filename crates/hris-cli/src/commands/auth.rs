use super::context::AppContext;
use anyhow::Result;
use hris_core::user::UserProfile;
use hris_infrastructure::services::AuthService;

pub async fn login(ctx: &AppContext, email: &str, password: &str, remember: bool) -> Result<()> {
    let auth = AuthService::new(ctx.client.clone(), ctx.session.clone());
    let profile = auth.sign_in_password(email, password).await?;
    ctx.prefs.remember(remember.then_some(email))?;
    print_welcome(&profile);
    Ok(())
}

pub async fn login_employee(
    ctx: &AppContext,
    company: &str,
    employee_id: &str,
    password: &str,
) -> Result<()> {
    let auth = AuthService::new(ctx.client.clone(), ctx.session.clone());
    let profile = auth.sign_in_employee(company, employee_id, password).await?;
    print_welcome(&profile);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    AuthService::new(ctx.client.clone(), ctx.session.clone())
        .logout()
        .await?;
    println!("{}", ctx.tr("auth.signOut"));
    Ok(())
}

pub async fn me(ctx: &AppContext) -> Result<()> {
    if ctx.session.token().is_none() {
        anyhow::bail!("Not signed in. Run `hris login` first.");
    }
    let profile = AuthService::new(ctx.client.clone(), ctx.session.clone())
        .me()
        .await?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

fn print_welcome(profile: &UserProfile) {
    let who = profile.name().or(profile.email()).unwrap_or("user");
    match profile.role() {
        Some(role) => println!("Signed in as {} ({})", who, role),
        None => println!("Signed in as {}", who),
    }
}
