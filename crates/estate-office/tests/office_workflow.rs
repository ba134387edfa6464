use estate_office::config::OfficeConfig;
use estate_office::office::{
    AdvancedPropertyFilter, AgentDraft, AgentRole, Coordinates, FurnishingStatus, InquiryDraft,
    InquirySource, InquiryStatus, InquiryUpdate, Location, OfficeService, PrincipalId,
    PropertyCategory, PropertyConfiguration, PropertyDraft, PropertyType, SearchCriteria,
};

fn principal(name: &str) -> PrincipalId {
    PrincipalId(format!("principal-{name}"))
}

fn office() -> OfficeService {
    OfficeService::from_config(&OfficeConfig {
        region: "central".to_string(),
        administrators: vec![principal("director")],
    })
}

fn draft(city: &str, suburb: &str, price: u64, category: PropertyCategory) -> PropertyDraft {
    PropertyDraft {
        title: format!("{suburb} listing"),
        description: String::new(),
        location: Location {
            city: city.to_string(),
            suburb: suburb.to_string(),
            area: "Central".to_string(),
            road_name: "Main Rd".to_string(),
        },
        coordinates: Coordinates {
            lat: 17.4,
            lng: 78.4,
        },
        price,
        category,
        property_type: PropertyType::Residential,
        configuration: PropertyConfiguration::ThreeBhk,
        furnishing: FurnishingStatus::SemiFurnished,
        images: Vec::new(),
    }
}

#[test]
fn a_full_office_day_flows_through_the_service() {
    let office = office();
    let director = principal("director");
    let lead = principal("lead");
    let assistant = principal("assistant");

    // The director registers the team, including themselves as a lister.
    for (id, name, role) in [
        (director.clone(), "Director", AgentRole::Admin),
        (lead.clone(), "Lead Agent", AgentRole::Agent),
        (assistant.clone(), "Front Desk", AgentRole::Assistant),
    ] {
        office
            .add_agent(
                &director,
                AgentDraft {
                    id,
                    name: name.to_string(),
                    contact_info: format!("{name}@office.example"),
                    role,
                },
            )
            .expect("registration succeeds");
    }

    // Listings arrive from the lead agent.
    let flat = office
        .add_property(&lead, draft("Hyderabad", "Kondapur", 4_000_000, PropertyCategory::Resale))
        .expect("listing added");
    let rental = office
        .add_property(&lead, draft("Hyderabad", "Madhapur", 45_000, PropertyCategory::Rental))
        .expect("listing added");
    office
        .add_property(
            &director,
            draft("Pune", "Baner", 9_000_000, PropertyCategory::UnderConstruction),
        )
        .expect("listing added");

    // The assistant can browse and search but not list.
    assert!(office.add_property(&assistant, draft("Pune", "Wakad", 1, PropertyCategory::Resale)).is_err());
    let in_city = office
        .search_and_filter_properties(
            &assistant,
            &SearchCriteria {
                city: Some("Hyderabad".to_string()),
                ..SearchCriteria::default()
            },
        )
        .expect("assistant searches");
    assert_eq!(in_city.len(), 2);

    let sale_or_rent = office
        .advanced_filter_properties(
            &assistant,
            &AdvancedPropertyFilter {
                categories: vec![PropertyCategory::Resale, PropertyCategory::Rental],
                ..AdvancedPropertyFilter::default()
            },
        )
        .expect("assistant filters");
    assert_eq!(sale_or_rent.len(), 2);
    assert_eq!(sale_or_rent[0].id, flat.id);

    // Front desk logs a walk-in against the rental, self-assigned.
    let walk_in = office
        .add_inquiry(
            &assistant,
            InquiryDraft {
                property_id: rental.id.clone(),
                customer_name: "Priya Shah".to_string(),
                contact_info: "priya@customers.example".to_string(),
                source: InquirySource::WalkIn,
                assigned_agent: assistant.clone(),
                notes: "Asked about parking".to_string(),
            },
        )
        .expect("inquiry logged");
    assert_eq!(walk_in.status, InquiryStatus::New);

    // The lead agent picks it up and reassigns it to themselves.
    let picked_up = office
        .update_inquiry(
            &lead,
            &walk_in.id,
            InquiryUpdate {
                customer_name: walk_in.customer_name.clone(),
                contact_info: walk_in.contact_info.clone(),
                source: walk_in.source,
                status: InquiryStatus::InProgress,
                assigned_agent: lead.clone(),
                notes: "Visit booked for Saturday".to_string(),
            },
        )
        .expect("lead updates any inquiry");
    assert_eq!(picked_up.assigned_agent, lead);

    // The assistant no longer sees it; the lead does.
    assert!(office.get_all_inquiries(&assistant).expect("own view").is_empty());
    assert_eq!(office.get_all_inquiries(&lead).expect("full view").len(), 1);

    // Analytics: the lead sees only their two listings, the director all three.
    let lead_view = office.get_combined_analytics(&lead).expect("analytics");
    assert_eq!(lead_view.summary.total_properties, 2);
    let director_view = office.get_combined_analytics(&director).expect("analytics");
    assert_eq!(director_view.summary.total_properties, 3);
    assert_eq!(director_view.density[0].region, "central");

    // Location lookups reflect the live collection.
    assert_eq!(
        office.get_all_cities(&assistant).expect("cities"),
        vec!["Hyderabad".to_string(), "Pune".to_string()]
    );

    // End of the pilot: the director wipes the office.
    office
        .reset_to_fresh_draft(&director)
        .expect("admin reset succeeds");
    assert!(office.get_all_agents(&director).expect("agents").is_empty());
    assert!(office.get_all_properties(&director).expect("listings").is_empty());
    assert!(office.get_all_inquiries(&director).expect("inquiries").is_empty());
}
