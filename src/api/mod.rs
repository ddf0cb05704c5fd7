//! Client side of the CogniBank backend contracts.
//!
//! The backend owns session handling, eligibility decisions and persistence;
//! this module only speaks its HTTP/JSON interface:
//!
//! | Endpoint                                  | Method                              |
//! |-------------------------------------------|-------------------------------------|
//! | `GET /health`                             | [`BackendClient::health`]           |
//! | `GET /loan-types`                         | [`BackendClient::loan_types`]       |
//! | `POST /chat/start`                        | [`BackendClient::start_chat`]       |
//! | `POST /chat/message`                      | [`BackendClient::send_message`]     |
//! | `GET /session/{id}`                       | [`BackendClient::session_info`]     |
//! | `GET /admin/stats`                        | [`BackendClient::admin_stats`]      |
//! | `GET /admin/applications/{type}?limit=N`  | [`BackendClient::applications`]     |
//! | `GET /admin/exports`                      | [`BackendClient::exports`]          |
//! | `GET /admin/export/{type}`                | [`BackendClient::download_export`]  |
//! | `POST /admin/generate-report/{type}`      | [`BackendClient::generate_report`]  |

mod client;
pub mod demo;
mod fetched;
pub mod models;
mod transport;

pub use client::{BackendClient, DEFAULT_APPLICATION_LIMIT};
pub use fetched::{fetch_or_demo, Fetched};
pub use transport::{ApiRequest, ApiResponse, HyperTransport, Transport};
