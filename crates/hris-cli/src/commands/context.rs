use anyhow::{Context, Result};
use hris_core::config::AppConfig;
use hris_core::i18n::{TranslationParams, Translator};
use hris_core::storage::SlotStorage;
use hris_infrastructure::{
    ApiClient, ConfigService, HrisPaths, JsonSlotStorage, Preferences, SessionGuard,
    SessionStore,
};
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs, wired once per invocation.
///
/// The session store and the API client share one token store, and the
/// session guard listens on the client's unauthorized bus.
pub struct AppContext {
    pub config: AppConfig,
    pub client: ApiClient,
    pub session: SessionStore,
    pub prefs: Preferences,
    pub translator: Translator,
    guard: SessionGuard,
}

impl AppContext {
    pub fn new(config_dir: Option<&Path>) -> Result<Self> {
        let config = ConfigService::new(config_dir).get_config();
        let storage_file = HrisPaths::new(config_dir)
            .storage_file()
            .context("Failed to resolve storage path")?;
        let storage: Arc<dyn SlotStorage> = Arc::new(JsonSlotStorage::with_path(storage_file));

        let client = ApiClient::from_config(&config, Arc::clone(&storage));
        let session = SessionStore::new(client.tokens().clone(), Arc::clone(&storage));
        let guard = SessionGuard::install(client.unauthorized_bus(), session.clone());
        let prefs = Preferences::new(storage);
        let translator = Translator::builtin().context("Failed to load translations")?;

        tracing::debug!(base_url = client.base_url(), "Context ready");

        Ok(Self {
            config,
            client,
            session,
            prefs,
            translator,
            guard,
        })
    }

    /// Translates `key` in the preferred language.
    pub fn tr(&self, key: &str) -> String {
        self.translator
            .t_lang(self.prefs.language(), key, &TranslationParams::new())
    }

    /// Reports a forced sign-out, if one happened during the command.
    pub fn finish(self) {
        if self.guard.take_redirect().is_some() {
            eprintln!("{}", self.tr("auth.sessionExpired"));
        }
        self.guard.uninstall();
    }
}
