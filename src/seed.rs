//! Demo roster and locations for a fresh database.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::database::models::{Address, Contact, Instruction, Location, User};
use crate::database::repositories::{LocationRepository, UserRepository};

/// Demo accounts cannot log in; bcrypt rejects this hash.
const DISABLED_PASSWORD_HASH: &str = "!";

const DEMO_USER_IDS: [&str; 15] = [
    "1a2b3c4d", "2b3c4d5e", "3c4d5e6f", "4d5e6f7g", "5e6f7g8h", "6f7g8h9i", "7g8h9i10",
    "8h9i10j1", "9i10j1k2", "10j1k2l3", "11k2l3m4", "12l3m4n5", "13m4n5o6", "14n5o6p7",
    "15o6p7q8",
];

struct DemoLocation {
    id: &'static str,
    name: &'static str,
    city: &'static str,
    state: &'static str,
    postal_code: &'static str,
    company: &'static str,
    contact: (&'static str, &'static str, &'static str),
    instruction: Option<(&'static str, &'static str, &'static str)>,
}

const DEMO_LOCATIONS: [DemoLocation; 15] = [
    DemoLocation {
        id: "1a2b3c4d5678",
        name: "Main Office",
        city: "New York",
        state: "NY",
        postal_code: "10001",
        company: "CompanyA",
        contact: ("Alice", "alice@companyA.com", "Manager"),
        instruction: Some(("Delivery", "Deliver at the back door.", "2023-01-01T00:00:00Z")),
    },
    DemoLocation {
        id: "2b3c4d5e6789",
        name: "Branch Office",
        city: "San Francisco",
        state: "CA",
        postal_code: "94016",
        company: "CompanyB",
        contact: ("Bob", "bob@companyB.com", "Supervisor"),
        instruction: Some(("Visitor", "Check in at the front desk.", "2023-01-03T00:00:00Z")),
    },
    DemoLocation {
        id: "3c4d5e6f7890",
        name: "Warehouse",
        city: "Chicago",
        state: "IL",
        postal_code: "60605",
        company: "CompanyC",
        contact: ("Charlie", "charlie@companyC.com", "Clerk"),
        instruction: Some(("Visitor", "Wear a helmet.", "2023-01-05T00:00:00Z")),
    },
    DemoLocation {
        id: "4d5e6f7g8901",
        name: "Remote Office",
        city: "Los Angeles",
        state: "CA",
        postal_code: "90001",
        company: "CompanyD",
        contact: ("David", "david@companyD.com", "Engineer"),
        instruction: Some(("Delivery", "Ring the doorbell.", "2023-01-07T00:00:00Z")),
    },
    DemoLocation {
        id: "5e6f7g8h9i",
        name: "Store",
        city: "Los Angeles",
        state: "CA",
        postal_code: "90001",
        company: "Company 5",
        contact: ("Emma", "emma@email.com", "HR"),
        instruction: None,
    },
    DemoLocation {
        id: "6f7g8h9i10",
        name: "Secondary Warehouse",
        city: "Seattle",
        state: "WA",
        postal_code: "98101",
        company: "Company 6",
        contact: ("Frank", "frank@email.com", "Manager"),
        instruction: None,
    },
    DemoLocation {
        id: "7g8h9i10j",
        name: "Location 7",
        city: "Boston",
        state: "MA",
        postal_code: "02101",
        company: "Company 7",
        contact: ("Grace", "grace@email.com", "HR"),
        instruction: None,
    },
    DemoLocation {
        id: "8h9i10j11",
        name: "Location 8",
        city: "Dallas",
        state: "TX",
        postal_code: "75201",
        company: "Company 8",
        contact: ("Henry", "henry@email.com", "Manager"),
        instruction: None,
    },
    DemoLocation {
        id: "9i10j11k1",
        name: "Location 9",
        city: "Chicago",
        state: "IL",
        postal_code: "60601",
        company: "Company 9",
        contact: ("Ivy", "ivy@email.com", "HR"),
        instruction: None,
    },
    DemoLocation {
        id: "10j11k12l",
        name: "Location 10",
        city: "Denver",
        state: "CO",
        postal_code: "80201",
        company: "Company 10",
        contact: ("Jack", "jack@email.com", "Manager"),
        instruction: None,
    },
    DemoLocation {
        id: "11k12l13m",
        name: "Location 11",
        city: "Miami",
        state: "FL",
        postal_code: "33101",
        company: "Company 11",
        contact: ("Kate", "kate@email.com", "HR"),
        instruction: None,
    },
    DemoLocation {
        id: "12l13m14n",
        name: "Location 12",
        city: "San Francisco",
        state: "CA",
        postal_code: "94101",
        company: "Company 12",
        contact: ("Leo", "leo@email.com", "Manager"),
        instruction: None,
    },
    DemoLocation {
        id: "13m14n15o",
        name: "Location 13",
        city: "Atlanta",
        state: "GA",
        postal_code: "30301",
        company: "Company 13",
        contact: ("Mia", "mia@email.com", "HR"),
        instruction: None,
    },
    DemoLocation {
        id: "14n15o16p",
        name: "Location 14",
        city: "Houston",
        state: "TX",
        postal_code: "77001",
        company: "Company 14",
        contact: ("Nina", "nina@email.com", "Manager"),
        instruction: None,
    },
    DemoLocation {
        id: "15o16p17q",
        name: "Location 15",
        city: "New York",
        state: "NY",
        postal_code: "10001",
        company: "Company 15",
        contact: ("Oliver", "oliver@email.com", "HR"),
        instruction: None,
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub locations: usize,
}

fn demo_user(index: usize, id: &str, now: DateTime<Utc>) -> User {
    User {
        id: id.to_string(),
        username: id.to_string(),
        name: format!("Demo User {}", index + 1),
        email: format!("{}@demo.shiftboard.local", id),
        phone: None,
        address: None,
        password_hash: DISABLED_PASSWORD_HASH.to_string(),
        is_admin_user: false,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

fn demo_location(demo: &DemoLocation, now: DateTime<Utc>) -> Result<Location> {
    let instructions = match demo.instruction {
        Some((kind, description, created)) => vec![Instruction {
            instruction_type: kind.to_string(),
            instruction_description: description.to_string(),
            instruction_creation_timestamp: created.parse()?,
        }],
        None => Vec::new(),
    };

    let (name, email, role) = demo.contact;
    Ok(Location {
        id: demo.id.to_string(),
        location_name: demo.name.to_string(),
        address: Address {
            city: demo.city.to_string(),
            state: demo.state.to_string(),
            country: None,
            postal_code: demo.postal_code.to_string(),
        },
        company_name: demo.company.to_string(),
        contacts: vec![Contact {
            contact_name: name.to_string(),
            contact_phone: None,
            contact_email: email.to_string(),
            contact_role: role.to_string(),
        }],
        instructions,
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

/// Insert the demo roster and locations that are not stored yet.
pub async fn seed_demo_data(
    users: &UserRepository,
    locations: &LocationRepository,
) -> Result<SeedSummary> {
    let now = Utc::now();
    let mut summary = SeedSummary::default();

    for (index, id) in DEMO_USER_IDS.iter().enumerate() {
        if users.find_by_id(id).await?.is_none() {
            users.create_user(&demo_user(index, id, now)).await?;
            summary.users += 1;
        }
    }

    for demo in &DEMO_LOCATIONS {
        if !locations.exists(demo.id).await? {
            locations.create_location(&demo_location(demo, now)?).await?;
            summary.locations += 1;
        }
    }

    log::info!(
        "Seeded {} demo user(s) and {} demo location(s)",
        summary.users,
        summary.locations
    );
    Ok(summary)
}
