//! Initial database migration.
//!
//! Creates the users, branches and expenses tables with their enums,
//! unique constraints and listing indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(BRANCHES_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM ('employee', 'manager', 'admin');
CREATE TYPE expense_status AS ENUM ('draft', 'submitted', 'approved', 'rejected');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id              UUID PRIMARY KEY,
    username        VARCHAR(100) NOT NULL,
    email           VARCHAR(255) NOT NULL,
    password_hash   VARCHAR(255) NOT NULL,
    full_name       VARCHAR(255) NOT NULL,
    employee_id     VARCHAR(50) NOT NULL,
    department      VARCHAR(100) NOT NULL,
    role            user_role NOT NULL DEFAULT 'employee',
    is_active       BOOLEAN NOT NULL DEFAULT true,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_users_username UNIQUE (username),
    CONSTRAINT uq_users_email UNIQUE (email),
    CONSTRAINT uq_users_employee_id UNIQUE (employee_id)
);
";

const BRANCHES_SQL: &str = r"
CREATE TABLE branches (
    id              UUID PRIMARY KEY,
    branch_name     VARCHAR(255) NOT NULL,
    location        VARCHAR(255) NOT NULL,
    contact_person  VARCHAR(255) NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE UNIQUE INDEX uq_branches_branch_name ON branches (LOWER(branch_name));
CREATE INDEX idx_branches_created_at ON branches (created_at DESC);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id                UUID PRIMARY KEY,
    employee_name     VARCHAR(255) NOT NULL,
    employee_id       VARCHAR(50) NOT NULL,
    department        VARCHAR(100) NOT NULL,
    category          VARCHAR(100) NOT NULL,
    amount            NUMERIC(12, 2) NOT NULL,
    description       TEXT NOT NULL,
    receipt_url       TEXT,
    status            expense_status NOT NULL DEFAULT 'submitted',
    submitted_date    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    approved_date     TIMESTAMPTZ,
    approver_name     VARCHAR(255),
    approval_notes    TEXT,
    rejection_reason  TEXT,
    created_at        TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at        TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_expenses_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_expenses_status ON expenses (status);
CREATE INDEX idx_expenses_employee_id ON expenses (employee_id);
CREATE INDEX idx_expenses_created_at ON expenses (created_at DESC);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS branches CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP TYPE IF EXISTS expense_status CASCADE;
DROP TYPE IF EXISTS user_role CASCADE;
";
