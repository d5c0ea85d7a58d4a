use crate::api::leave_application::{CreateLeaveApplication, UpdateLeaveApplication};
use crate::api::leave_balance::{BalanceOverview, ProvisionBalance};
use crate::api::review::{
    ApplicationFilter, ApplicationListResponse, ApplicationRow, ReviewDecision,
};
use crate::model::leave_type::LeaveType;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Leave Portal API",
        version = "1.0.0",
        description = r#"
## Student Leave Portal

This API powers a **leave-request management portal**: students apply for
leave against a per-type annual balance; administrators review, approve, or
reject the applications.

### 🔹 Key Features
- **Leave Applications**
  - Submit, edit, and cancel pending applications; view own history
- **Review**
  - Admin approval/rejection with comments; approval decrements the
    student's balance
- **Balances**
  - Per-student, per-type, per-year entitlement counters with a dashboard
    overview
- **Leave Types**
  - Seeded catalog of leave categories with annual caps

### 🔐 Security
Endpoints are protected using **JWT Bearer authentication**. Students can
only act on their own applications; review and provisioning require the
**Admin** role.

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for the admin application list

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_application::submit_leave,
        crate::api::leave_application::my_leave_list,
        crate::api::leave_application::get_leave,
        crate::api::leave_application::update_leave,
        crate::api::leave_application::cancel_leave,

        crate::api::review::approve_leave,
        crate::api::review::reject_leave,
        crate::api::review::pending_applications,
        crate::api::review::application_list,

        crate::api::leave_balance::my_balances,
        crate::api::leave_balance::provision_balance,

        crate::api::leave_type::list_leave_types
    ),
    components(
        schemas(
            CreateLeaveApplication,
            UpdateLeaveApplication,
            ReviewDecision,
            ApplicationFilter,
            ApplicationRow,
            ApplicationListResponse,
            BalanceOverview,
            ProvisionBalance,
            LeaveType
        )
    ),
    tags(
        (name = "Leave", description = "Leave application APIs"),
        (name = "Review", description = "Admin review APIs"),
        (name = "Balance", description = "Leave balance APIs"),
    )
)]
pub struct ApiDoc;
