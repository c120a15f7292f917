// Sample Rust sources for scanning

pub struct User {
    pub id: u32,
    pub name: String,
}

impl User {
    pub fn new(id: u32, name: String) -> Self {
        Self { id, name }
    }

    pub fn display(&self) -> String {
        if self.name.is_empty() {
            return format!("User {}", self.id);
        }
        format!("User {}: {}", self.id, self.name)
    }
}

pub enum Role {
    Admin,
    Member = 2,
}

pub fn create_user(id: u32, name: String) -> User {
    User::new(id, name)
}
