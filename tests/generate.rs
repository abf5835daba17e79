use graphql_forge::{GenerationConfig, Generator};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const SDL: &str = r#"
    schema { query: Query mutation: Mutation }

    scalar DateTime

    "lifecycle state"
    enum Status { ACTIVE INACTIVE }

    "a registered user"
    type User {
        id: ID!
        name: String
        createdAt: DateTime!
        status: Status
        posts: [Post!]!
    }

    type Post {
        id: ID!
        title: String!
        author: User!
    }

    input CreateUserInput {
        name: String!
        status: Status
    }

    type Query {
        user(id: ID!): User
        users(limit: Int = 10): [User!]!
    }

    type Mutation {
        createUser(input: CreateUserInput!): User!
    }
"#;

fn temp_out(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "graphql-forge-it-{}-{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn collect_files(root: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let rel = path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .to_string();
                files.insert(rel, fs::read_to_string(&path).unwrap());
            }
        }
    }
    files
}

#[test]
fn generates_full_artifact_set() {
    let out = temp_out("full");
    let config = GenerationConfig::new("petstore.api", &out, "schema.graphql");
    let mut generator = Generator::new(config).unwrap();
    let result = generator.generate(SDL).unwrap();

    let files = collect_files(&out);
    assert_eq!(result.files_written(), files.len());

    // data types (roots excluded), selectors, roots, and per-field builders
    for expected in [
        "petstore/api/type/User.rs",
        "petstore/api/type/Post.rs",
        "petstore/api/type/Status.rs",
        "petstore/api/input/CreateUserInput.rs",
        "petstore/api/query/UserSelector.rs",
        "petstore/api/query/PostSelector.rs",
        "petstore/api/query/QueryRoot.rs",
        "petstore/api/query/UserQuery.rs",
        "petstore/api/query/UsersQuery.rs",
        "petstore/api/mutation/MutationRoot.rs",
        "petstore/api/mutation/CreateUserMutation.rs",
    ] {
        assert!(files.contains_key(expected), "missing {expected}");
    }
    assert!(!files.contains_key("petstore/api/type/Query.rs"));
    assert!(!files.contains_key("petstore/api/type/Mutation.rs"));

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn regeneration_is_byte_identical() {
    let out = temp_out("rerun-a");
    let config = GenerationConfig::new("petstore.api", &out, "schema.graphql");
    let mut generator = Generator::new(config).unwrap();
    generator.generate(SDL).unwrap();
    let first = collect_files(&out);

    let out_again = temp_out("rerun-b");
    let config = GenerationConfig::new("petstore.api", &out_again, "schema.graphql");
    let mut generator = Generator::new(config).unwrap();
    generator.generate(SDL).unwrap();
    let second = collect_files(&out_again);

    assert_eq!(first, second);

    let _ = fs::remove_dir_all(&out);
    let _ = fs::remove_dir_all(&out_again);
}

#[test]
fn suffixes_touch_data_classes_only() {
    let out = temp_out("suffix");
    let config = GenerationConfig::new("petstore.api", &out, "schema.graphql")
        .with_type_suffix("Type")
        .with_input_suffix("Input");
    let mut generator = Generator::new(config).unwrap();
    generator.generate(SDL).unwrap();

    let files = collect_files(&out);
    assert!(files.contains_key("petstore/api/type/UserType.rs"));
    // blind append on an input already named ...Input
    assert!(files.contains_key("petstore/api/input/CreateUserInputInput.rs"));
    // structural names are untouched by suffixes
    assert!(files.contains_key("petstore/api/query/UserSelector.rs"));
    assert!(files.contains_key("petstore/api/query/UserQuery.rs"));
    assert!(!files.contains_key("petstore/api/query/UserTypeSelector.rs"));

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn scalar_override_reaches_generated_fields() {
    let out = temp_out("scalar");
    let config = GenerationConfig::new("petstore.api", &out, "schema.graphql")
        .with_scalar("DateTime", "time::OffsetDateTime");
    let mut generator = Generator::new(config).unwrap();
    generator.generate(SDL).unwrap();

    let files = collect_files(&out);
    let user = &files["petstore/api/type/User.rs"];
    assert!(user.contains("pub created_at: time::OffsetDateTime,"));
    assert!(!user.contains("pub created_at: String,"));

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn generated_sources_reference_each_other_by_path() {
    let out = temp_out("paths");
    let config = GenerationConfig::new("petstore.api", &out, "schema.graphql");
    let mut generator = Generator::new(config).unwrap();
    generator.generate(SDL).unwrap();

    let files = collect_files(&out);
    let user_selector = &files["petstore/api/query/UserSelector.rs"];
    assert!(user_selector.contains("crate::petstore::api::query::PostSelector"));

    let post_selector = &files["petstore/api/query/PostSelector.rs"];
    assert!(post_selector.contains("crate::petstore::api::query::UserSelector"));

    let create_user = &files["petstore/api/mutation/CreateUserMutation.rs"];
    assert!(create_user.contains("crate::petstore::api::input::CreateUserInput"));
    assert!(create_user.contains("crate::petstore::api::query::UserSelector"));

    let user_query = &files["petstore/api/query/UserQuery.rs"];
    assert!(user_query.contains("Operation<Option<Box<crate::petstore::api::r#type::User>>>"));

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn builders_flag_prunes_input_builders() {
    let out = temp_out("no-builders");
    let config =
        GenerationConfig::new("petstore.api", &out, "schema.graphql").with_builders(false);
    let mut generator = Generator::new(config).unwrap();
    generator.generate(SDL).unwrap();

    let files = collect_files(&out);
    let input = &files["petstore/api/input/CreateUserInput.rs"];
    assert!(!input.contains("CreateUserInputBuilder"));
    assert!(input.contains("pub fn to_argument(&self)"));

    let _ = fs::remove_dir_all(&out);
}
