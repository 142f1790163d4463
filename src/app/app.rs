use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tracing::{error, info, warn};

use crate::config::admin_user_conf::AdminUserConfig;
use crate::config::{AppConfig, EmailConfig, MongoConfig, PasswordResetConfig};
use crate::handler::admin_handler::AdminState;
use crate::handler::auth_handler::AuthState;
use crate::model::user::{Role, User};
use crate::repository::booking_repo::{BookingRepository, MongoBookingRepository};
use crate::repository::contact_repo::{ContactMessageRepository, MongoContactMessageRepository};
use crate::repository::store::MongoStore;
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::router::admin_router::admin_router;
use crate::router::auth_router::auth_router;
use crate::router::booking_router::booking_router;
use crate::router::contact_router::contact_router;
use crate::router::user_router::user_router;
use crate::service::auth_service::AuthServiceImpl;
use crate::service::booking_service::BookingServiceImpl;
use crate::service::contact_service::ContactServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::email::SmtpEmailService;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

pub struct App {
    config: AppConfig,
    router: Router,
    user_repo: Arc<dyn UserRepository>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let reset_config = PasswordResetConfig::from_env().expect("Password reset config error");

        let store = MongoStore::connect(&mongo_config)
            .await
            .expect("Failed to connect to MongoDB");

        let user_repo: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(&store));
        let booking_repo: Arc<dyn BookingRepository> = Arc::new(MongoBookingRepository::new(&store));
        let contact_repo: Arc<dyn ContactMessageRepository> =
            Arc::new(MongoContactMessageRepository::new(&store));

        // The mailer is optional: without SMTP settings the reset link is
        // only logged (and returned in dev mode).
        let mailer = match EmailConfig::from_env() {
            Ok(email_config) => match SmtpEmailService::new(email_config) {
                Ok(service) => Some(Arc::new(service)),
                Err(e) => {
                    warn!("SMTP email service unavailable: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Email config not loaded: {} (password reset emails disabled)", e);
                None
            }
        };

        let auth_service =
            Arc::new(AuthServiceImpl::new(user_repo.clone(), reset_config, mailer));
        let booking_service =
            Arc::new(BookingServiceImpl::new(booking_repo.clone(), user_repo.clone()));
        let user_service = Arc::new(UserServiceImpl::new(user_repo.clone()));
        let contact_service = Arc::new(ContactServiceImpl::new(contact_repo.clone()));

        let auth_state = Arc::new(AuthState {
            service: auth_service,
            dev_mode: config.dev_mode,
        });
        let admin_state = Arc::new(AdminState {
            user_service: user_service.clone(),
            booking_service: booking_service.clone(),
        });

        let router = Router::new()
            .merge(auth_router(auth_state))
            .merge(booking_router(booking_service))
            .merge(user_router(user_service))
            .merge(admin_router(admin_state))
            .merge(contact_router(contact_service))
            .route("/health", get(|| async { "OK" }));

        let app = App { config, router, user_repo };
        app.create_first_admin_user().await;
        app
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }

    /// Seeds the bootstrap ADMIN account from `ADMIN_*` env vars. A missing
    /// config is not an error: the instance simply starts without one.
    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };

        match self.user_repo.find_by_email(&admin_conf.email).await {
            Ok(Some(_)) => {
                info!("Admin user already exists, skipping creation");
                return;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to check for existing admin user: {e}");
                return;
            }
        }

        let hash = match PasswordUtilsImpl::hash_password(&admin_conf.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {e}");
                return;
            }
        };

        let admin = User {
            id: None,
            name: admin_conf.name,
            email: admin_conf.email,
            password: hash,
            phone: admin_conf.phone,
            role: Role::Admin,
            date_of_birth: None,
            nationality: None,
            passport_number: None,
            preferences: None,
            reset_token: None,
            reset_token_expiry: None,
            created_at: None,
            updated_at: None,
        };

        match self.user_repo.insert(admin).await {
            Ok(user) => info!("First admin user created: {}", user.email),
            Err(e) => error!("Failed to create first admin user: {e}"),
        }
    }
}
