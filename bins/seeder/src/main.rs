//! Database seeder for Tracker development and demos.
//!
//! Seeds demo users, branches and expenses through the same repositories the
//! server uses. Each step skips records that already exist, so the seeder can
//! be re-run safely.
//!
//! Usage: cargo run --bin seeder

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracker_core::Stores;
use tracker_core::auth::{User, UserRole, hash_password};
use tracker_core::branch::Branch;
use tracker_core::expense::{Expense, ExpenseCategory, ExpenseFilter, ExpenseStatus};
use tracker_shared::config::DatabaseConfig;
use tracker_shared::types::{BranchId, ExpenseId, UserId};

/// Demo accounts: username, password, full name, employee id, department, role.
const DEMO_USERS: [(&str, &str, &str, &str, &str, UserRole); 3] = [
    ("admin", "admin123", "System Administrator", "ADM001", "IT", UserRole::Admin),
    ("manager", "manager123", "Department Manager", "MGR001", "Management", UserRole::Manager),
    ("barath", "123456", "Barath Kumar", "EMP001", "Sales", UserRole::Employee),
];

/// Demo branches: name, location, contact person.
const DEMO_BRANCHES: [(&str, &str, &str); 5] = [
    ("Mumbai Central", "Mumbai, Maharashtra", "Rahul Sharma"),
    ("Delhi North", "Delhi, NCR", "Priya Singh"),
    ("Bangalore Tech Park", "Bangalore, Karnataka", "Arun Kumar"),
    ("Chennai Express", "Chennai, Tamil Nadu", "Meera Reddy"),
    ("Hyderabad Hub", "Hyderabad, Telangana", "Suresh Das"),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let config = DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
    };

    println!("Connecting to database...");
    let db = tracker_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    let stores = tracker_db::stores(&db);

    println!("Seeding demo users...");
    seed_users(&stores).await;

    println!("Seeding demo branches...");
    seed_branches(&stores).await;

    println!("Seeding demo expenses...");
    seed_expenses(&stores).await;

    println!("Seeding complete!");
}

/// Seeds demo users with argon2 password hashes.
async fn seed_users(stores: &Stores) {
    for (username, password, full_name, employee_id, department, role) in DEMO_USERS {
        if stores
            .users
            .find_by_username(username)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  User {username} already exists, skipping...");
            continue;
        }

        let password_hash = hash_password(password).expect("Failed to hash demo password");
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            email: format!("{username}@tracker.com"),
            password_hash,
            full_name: full_name.to_string(),
            employee_id: employee_id.to_string(),
            department: department.to_string(),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        match stores.users.insert(&user).await {
            Ok(()) => println!("  Created user: {username} ({role})"),
            Err(e) => eprintln!("Failed to insert user {username}: {e}"),
        }
    }
}

/// Seeds demo branches.
async fn seed_branches(stores: &Stores) {
    for (name, location, contact_person) in DEMO_BRANCHES {
        if stores
            .branches
            .find_by_name(name)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Branch {name} already exists, skipping...");
            continue;
        }

        let now = Utc::now();
        let branch = Branch {
            id: BranchId::new(),
            branch_name: name.to_string(),
            location: location.to_string(),
            contact_person: contact_person.to_string(),
            created_at: now,
            updated_at: now,
        };

        match stores.branches.insert(&branch).await {
            Ok(()) => println!("  Created branch: {name}"),
            Err(e) => eprintln!("Failed to insert branch {name}: {e}"),
        }
    }
}

/// Seeds demo expenses when the table is empty.
async fn seed_expenses(stores: &Stores) {
    let existing = stores
        .expenses
        .list(&ExpenseFilter::default())
        .await
        .expect("Failed to list expenses");
    if !existing.is_empty() {
        println!("  Expenses already exist, skipping...");
        return;
    }

    let now = Utc::now();
    let yesterday = now - Duration::days(1);
    let two_days_ago = now - Duration::days(2);

    let expenses = [
        demo_expense(
            ("Rajesh Kumar", "EMP002", "Sales"),
            ExpenseCategory::Travel,
            dec!(2500.00),
            "Client meeting in Delhi",
            ExpenseStatus::Submitted,
            now,
        ),
        demo_expense(
            ("Priya Sharma", "EMP003", "Operations"),
            ExpenseCategory::OfficeSupplies,
            dec!(850.00),
            "Laptop accessories and stationery",
            ExpenseStatus::Approved,
            yesterday,
        ),
        demo_expense(
            ("Arun Patel", "EMP004", "Sales"),
            ExpenseCategory::Meals,
            dec!(1200.00),
            "Business lunch with potential client",
            ExpenseStatus::Submitted,
            two_days_ago,
        ),
        demo_expense(
            ("Meera Reddy", "EMP005", "Support"),
            ExpenseCategory::Communications,
            dec!(450.00),
            "Mobile bill reimbursement",
            ExpenseStatus::Rejected,
            two_days_ago,
        ),
        demo_expense(
            ("Suresh Das", "EMP006", "IT"),
            ExpenseCategory::Training,
            dec!(3200.00),
            "Professional certification course",
            ExpenseStatus::Approved,
            yesterday,
        ),
    ];

    for expense in expenses {
        match stores.expenses.insert(&expense).await {
            Ok(()) => println!(
                "  Created expense: {} {} ({})",
                expense.employee_name, expense.amount, expense.status
            ),
            Err(e) => eprintln!("Failed to insert expense: {e}"),
        }
    }
}

fn demo_expense(
    (employee_name, employee_id, department): (&str, &str, &str),
    category: ExpenseCategory,
    amount: Decimal,
    description: &str,
    status: ExpenseStatus,
    submitted: DateTime<Utc>,
) -> Expense {
    let decided = submitted + Duration::hours(4);
    Expense {
        id: ExpenseId::new(),
        employee_name: employee_name.to_string(),
        employee_id: employee_id.to_string(),
        department: department.to_string(),
        category,
        amount,
        description: description.to_string(),
        receipt_url: None,
        status,
        submitted_date: submitted,
        approved_date: (status == ExpenseStatus::Approved).then_some(decided),
        approver_name: (status == ExpenseStatus::Approved).then(|| "manager".to_string()),
        approval_notes: None,
        rejection_reason: (status == ExpenseStatus::Rejected)
            .then(|| "Personal usage not reimbursable".to_string()),
        created_at: submitted,
        updated_at: if status.is_terminal() { decided } else { submitted },
    }
}
