use estate_office::error::AppError;
use estate_office::office::{AgentDraft, AgentRole, OfficeService, PrincipalId};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Listings used by the CLI demo, in the bulk-intake CSV format.
pub(crate) const SAMPLE_LISTINGS_CSV: &str = "\
Title,Description,City,Suburb,Area,Road,Latitude,Longitude,Price,Category,Type,Configuration,Furnishing,Images
Lakeview 2BHK,Bright corner unit facing the lake,Hyderabad,Kondapur,Botanical Garden,Main Rd,17.46,78.36,5500000,Resale,Residential,2 BHK,Semi-Furnished,blob-lakeview-01|blob-lakeview-02
Skyline Penthouse,Top-floor unit with terrace,Hyderabad,Madhapur,Hitec City,Cyber Towers Rd,17.45,78.38,21000000,Resale,Residential,Penthouse,Furnished,blob-skyline-01
Tech Park Office,Plug-and-play office floor,Hyderabad,Gachibowli,Financial District,ORR Service Rd,17.42,78.34,95000,Rental,Commercial,Office Space,Furnished,
Baner Row House,Quiet lane close to schools,Pune,Baner,Pashan Link,Sus Rd,18.56,73.78,12500000,Under Construction,Residential,Row House,Unfurnished,blob-baner-01
Wakad Warehouse,Dock access and 9m clear height,Pune,Wakad,MIDC Edge,Service Rd 4,18.60,73.76,150000,Rental,Industrial,Warehouse,Unfurnished,
";

pub(crate) fn director() -> PrincipalId {
    PrincipalId("principal-demo-director".to_string())
}

pub(crate) fn lead_agent() -> PrincipalId {
    PrincipalId("principal-demo-lead".to_string())
}

pub(crate) fn front_desk() -> PrincipalId {
    PrincipalId("principal-demo-frontdesk".to_string())
}

/// Register the demo team: the director (also a lister), a lead agent, and a
/// front-desk assistant.
pub(crate) fn seed_team(office: &OfficeService) -> Result<(), AppError> {
    for (id, name, role) in [
        (director(), "Demo Director", AgentRole::Admin),
        (lead_agent(), "Lead Agent", AgentRole::Agent),
        (front_desk(), "Front Desk", AgentRole::Assistant),
    ] {
        office.add_agent(
            &director(),
            AgentDraft {
                id,
                name: name.to_string(),
                contact_info: format!(
                    "{}@office.example",
                    name.to_ascii_lowercase().replace(' ', ".")
                ),
                role,
            },
        )?;
    }
    Ok(())
}
