use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", dir.path())
        .env_remove("FINTRACK_LOG")
        .current_dir(dir.path());
    cmd
}

fn add(dir: &TempDir, description: &str, amount: &str, kind: &str) -> assert_cmd::assert::Assert {
    fintrack(dir)
        .args(["transaction", "add", description, amount, "--type", kind])
        .assert()
}

#[test]
fn test_dashboard_totals() {
    let dir = TempDir::new().unwrap();

    add(&dir, "Salary", "1000", "income")
        .success()
        .stdout(predicate::str::contains("Transaction added successfully!"));
    fintrack(&dir)
        .args(["txn", "add", "Groceries", "300", "-t", "expense", "-c", "Food"])
        .assert()
        .success();

    fintrack(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("₹1000.00"))
        .stdout(predicate::str::contains("₹300.00"))
        .stdout(predicate::str::contains("₹700.00"));
}

#[test]
fn test_invalid_transaction_reports_errors() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["transaction", "add", "", "0", "--type", "income"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Description is required"))
        .stderr(predicate::str::contains("Amount must be a positive number"));

    fintrack(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found"));
}

#[test]
fn test_insufficient_balance_declined() {
    let dir = TempDir::new().unwrap();

    add(&dir, "Salary", "100", "income").success();
    fintrack(&dir)
        .args(["transaction", "add", "Laptop", "500", "--type", "expense"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Insufficient balance!"))
        .stdout(predicate::str::contains("Expense not added"));

    fintrack(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("₹0.00"));
}

#[test]
fn test_budget_overrun_declined() {
    let dir = TempDir::new().unwrap();

    add(&dir, "Salary", "1000", "income").success();
    fintrack(&dir)
        .args(["budget", "add", "Food", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("monthly budget of ₹200.00 for Food"));
    fintrack(&dir)
        .args(["transaction", "add", "Groceries", "180", "-t", "expense", "-c", "Food"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["transaction", "add", "Dinner", "50", "-t", "expense", "-c", "Food"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("exceed your budget for Food"));

    fintrack(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On Track"));
}

#[test]
fn test_list_filters_by_search() {
    let dir = TempDir::new().unwrap();

    add(&dir, "Salary", "1000", "income").success();
    add(&dir, "Freelance gig", "250", "income").success();

    fintrack(&dir)
        .args(["transaction", "list", "--search", "GIG"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Freelance gig"))
        .stdout(predicate::str::contains("Salary").not());
}

#[test]
fn test_export_and_import() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Salary", "1000", "income").success();

    fintrack(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to finance-data.json"));
    let export_path = dir.path().join("finance-data.json");
    assert!(export_path.exists());

    let other = TempDir::new().unwrap();
    fintrack(&other)
        .arg("import")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transactions, 8 categories, 0 budgets"));
    fintrack(&other)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("₹1000.00"));
}

#[test]
fn test_reset_with_yes() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Salary", "1000", "income").success();

    fintrack(&dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All data has been reset."));

    fintrack(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found"));
}

#[test]
fn test_unknown_category_fails() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["budget", "add", "Travel", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found: Travel"));
}
