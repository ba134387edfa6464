use crate::infra::{director, front_desk, lead_agent, seed_team, SAMPLE_LISTINGS_CSV};
use clap::Args;
use estate_office::error::AppError;
use estate_office::office::{
    AdvancedPropertyFilter, InquiryDraft, InquirySource, InquiryStatus, InquiryUpdate,
    OfficeService, Property, PropertyCategory, SearchCriteria, StaticAdminRoster,
};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed listings from a CSV export instead of the built-in sample set
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
    /// Skip the inquiry portion of the walkthrough
    #[arg(long)]
    pub(crate) skip_inquiries: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let office = OfficeService::new(
        Arc::new(StaticAdminRoster::new([director()])),
        "central",
    );

    println!("== Team ==");
    seed_team(&office)?;
    for agent in office.get_all_agents(&director())? {
        println!("  {} [{}] <{}>", agent.name, agent.role.label(), agent.contact_info);
    }

    println!("\n== Listings ==");
    let listings = match args.listings_csv {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            office.import_listings(&director(), file)?
        }
        None => office.import_listings(&director(), Cursor::new(SAMPLE_LISTINGS_CSV))?,
    };
    for listing in &listings {
        print_listing(listing);
    }

    println!("\n== Search: rentals in Hyderabad ==");
    let rentals = office.search_and_filter_properties(
        &front_desk(),
        &SearchCriteria {
            city: Some("Hyderabad".to_string()),
            category: Some(PropertyCategory::Rental),
            ..SearchCriteria::default()
        },
    )?;
    for listing in &rentals {
        print_listing(listing);
    }

    println!("\n== Advanced filter: resale or rental, anywhere ==");
    let matches = office.advanced_filter_properties(
        &front_desk(),
        &AdvancedPropertyFilter {
            categories: vec![PropertyCategory::Resale, PropertyCategory::Rental],
            ..AdvancedPropertyFilter::default()
        },
    )?;
    println!("  {} of {} listings match", matches.len(), listings.len());

    if let (false, Some(first_listing)) = (args.skip_inquiries, listings.first()) {
        println!("\n== Inquiries ==");
        let walk_in = office.add_inquiry(
            &front_desk(),
            InquiryDraft {
                property_id: first_listing.id.clone(),
                customer_name: "Priya Shah".to_string(),
                contact_info: "priya@customers.example".to_string(),
                source: InquirySource::WalkIn,
                assigned_agent: front_desk(),
                notes: "Asked about parking".to_string(),
            },
        )?;
        println!(
            "  front desk logged {} for '{}'",
            walk_in.id, first_listing.title
        );

        let picked_up = office.update_inquiry(
            &lead_agent(),
            &walk_in.id,
            InquiryUpdate {
                customer_name: walk_in.customer_name.clone(),
                contact_info: walk_in.contact_info.clone(),
                source: walk_in.source,
                status: InquiryStatus::InProgress,
                assigned_agent: lead_agent(),
                notes: "Visit booked for Saturday".to_string(),
            },
        )?;
        println!(
            "  lead agent took it over (status now {})",
            picked_up.status.label()
        );
        println!(
            "  front desk now sees {} inquiries of their own",
            office.get_all_inquiries(&front_desk())?.len()
        );
    }

    println!("\n== Analytics ({}) ==", office.region());
    let combined = office.get_combined_analytics(&director())?;
    println!("  total listings: {}", combined.summary.total_properties);
    if let Some(average) = combined.summary.average_price {
        println!("  average price:  {average}");
    }
    if let Some(spread) = combined.summary.price_spread {
        println!("  price range:    {} - {}", spread.lowest, spread.highest);
    }
    for slice in combined
        .summary
        .by_category
        .iter()
        .chain(&combined.summary.by_configuration)
    {
        if slice.count > 0 {
            println!("  {:<14} {}", slice.key, slice.count);
        }
    }

    println!("\n== Coverage ==");
    for city in office.get_all_cities(&front_desk())? {
        let suburbs = office.get_suburbs_for_city(&front_desk(), &city)?;
        println!("  {city}: {}", suburbs.join(", "));
    }

    Ok(())
}

fn print_listing(listing: &Property) {
    println!(
        "  [{}] {} - {} {} in {}, {} ({})",
        listing.status.label(),
        listing.title,
        listing.configuration.label(),
        listing.property_type.label(),
        listing.location.suburb,
        listing.location.city,
        listing.price
    );
}
