pub const API_NAME: &str = "[Velocita API]";
