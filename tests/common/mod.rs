#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv_records::{RelationTable, record};
use tempfile::{TempDir, tempdir};

record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Address {
        pub street: String [csv = "street", relation = "Street"],
        pub city: String [csv = "city", relation = ""],
        pub county: String [csv = "-"],
        pub state: String [csv = "state", relation = "State"],
        pub zip: String [csv = "zip"],
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct User {
        pub name: String [csv = "name", relation = "Name"],
        pub age: i32 [csv = "age", relation = "Age"],
        pub active: bool [csv = "active", relation = "Active"],
        pub email: String [csv = "email"],
        pub score: f64 [csv = "score", relation = "Score"],
        pub logins: u32 [csv = "logins"],
        pub password: String [csv = "-", relation = "-"],
        pub address: Address [csv = "address", relation = "Address"],
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Person {
        pub name: String [csv = "name", relation = "Name"],
        pub age: i64 [csv = "age", relation = "Age"],
    }
}

pub const USER_HEADER: &str =
    "name,age,active,email,score,logins,address.street,address.city,address.state,address.zip";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sample_users() -> Vec<User> {
    vec![
        User {
            name: "Ada".to_string(),
            age: 36,
            active: true,
            email: "ada@example.com".to_string(),
            score: 98.5,
            logins: 12,
            password: "hunter2".to_string(),
            address: Address {
                street: "12 St James's Square".to_string(),
                city: "London".to_string(),
                county: "Greater London".to_string(),
                state: "ENG".to_string(),
                zip: "SW1Y 4JH".to_string(),
            },
        },
        User {
            name: "Grace".to_string(),
            age: 85,
            active: false,
            email: "grace@example.com".to_string(),
            score: -3.25,
            logins: 0,
            password: "cobol".to_string(),
            address: Address {
                street: "1 Navy Way".to_string(),
                city: "Arlington".to_string(),
                county: "Arlington".to_string(),
                state: "VA".to_string(),
                zip: "22202".to_string(),
            },
        },
    ]
}

/// Relations for every relational path of [`User`], renamed to snake case.
pub fn user_relations() -> RelationTable {
    [
        ("Name", "full_name"),
        ("Age", "years"),
        ("Active", "is_active"),
        ("Score", "rating"),
        ("Address Street", "street"),
        ("Address city", "city"),
        ("Address State", "region"),
    ]
    .into_iter()
    .collect()
}

pub fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf-8 output")
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}
