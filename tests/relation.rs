mod common;

use common::{Address, Person, User, init_logging, sample_users, text, user_relations};
use csv_records::{
    Error, ErrorCategory, RelationDecoder, RelationEncoder, RelationTable, relation,
};

fn name_only() -> RelationTable {
    RelationTable::from_json_str(r#"{"Name": ["full_name"]}"#).expect("relation table")
}

#[test]
fn relational_paths_join_segments_with_spaces() {
    init_logging();
    let options = relation::options::<User>().expect("options");
    assert_eq!(
        options,
        [
            "Name",
            "Age",
            "Active",
            "Score",
            "Address Street",
            "Address city",
            "Address State",
        ]
    );
}

#[test]
fn only_mapped_paths_reach_the_header() {
    init_logging();
    let people = vec![Person {
        name: "Ada".to_string(),
        age: 36,
    }];
    let output = relation::marshal(&people, &name_only()).expect("encode");
    assert_eq!(text(output), "full_name\nAda\n");
}

#[test]
fn header_follows_declaration_order_not_table_order() {
    init_logging();
    let table = RelationTable::new()
        .with("Address city", "town")
        .with("Score", "rating")
        .with("Name", "who");
    let encoder = RelationEncoder::new::<User>(&table).expect("encoder");
    assert_eq!(encoder.header(), ["who", "rating", "town"]);

    let output = text(encoder.encode(&sample_users()).expect("encode"));
    assert_eq!(output, "who,rating,town\nAda,98.5,London\nGrace,-3.25,Arlington\n");
}

#[test]
fn excluded_and_unannotated_fields_ignore_table_entries() {
    init_logging();
    let table = RelationTable::new()
        .with("password", "pw")
        .with("Password", "pw")
        .with("Email", "email")
        .with("email", "email")
        .with("Name", "n");
    let encoder = RelationEncoder::new::<User>(&table).expect("encoder");
    assert_eq!(encoder.header(), ["n"]);
}

#[test]
fn empty_relation_table_is_a_configuration_error() {
    init_logging();
    let empty = RelationTable::new();
    let people = vec![Person::default()];

    let err = relation::marshal(&people, &empty).unwrap_err();
    assert!(matches!(err, Error::EmptyRelationTable));
    assert_eq!(err.category(), ErrorCategory::Configuration);

    let err = relation::marshal_record(&people[0], &empty).unwrap_err();
    assert!(matches!(err, Error::EmptyRelationTable));

    let mut decoded: Vec<Person> = Vec::new();
    let err = relation::unmarshal(b"full_name\nAda\n", &mut decoded, &empty).unwrap_err();
    assert!(matches!(err, Error::EmptyRelationTable));

    let mut person = Person::default();
    let err = relation::unmarshal_row(1, b"full_name\nAda\n", &mut person, &empty).unwrap_err();
    assert!(matches!(err, Error::EmptyRelationTable));
}

#[test]
fn table_matching_no_field_yields_an_empty_header_error() {
    init_logging();
    let table = RelationTable::new().with("Nickname", "nick");
    let err = relation::marshal(&[Person::default()], &table).unwrap_err();
    assert!(matches!(err, Error::EmptyHeader));
    assert!(err.is_configuration());
}

#[test]
fn two_paths_sharing_a_column_name_are_rejected_on_encode() {
    init_logging();
    let table = RelationTable::new().with("Name", "col").with("Age", "col");
    let people = vec![Person {
        name: "Ada".to_string(),
        age: 36,
    }];
    let err = relation::marshal(&people, &table).unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(
        err,
        Error::DuplicateColumn { ref name, first: 1, second: 2 } if name == "col"
    ));
}

#[test]
fn duplicated_columns_outside_the_table_are_ignored() {
    init_logging();
    let input = b"full_name,note,note\nAda,x,y\n";
    let mut people: Vec<Person> = Vec::new();
    relation::unmarshal(input, &mut people, &name_only()).expect("decode");
    assert_eq!(
        people,
        vec![Person {
            name: "Ada".to_string(),
            age: 0,
        }]
    );

    let err = relation::unmarshal(
        b"full_name,full_name\nAda,Grace\n",
        &mut people,
        &name_only(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateColumn { ref name, .. } if name == "full_name"));
    assert_eq!(people.len(), 1);
}

#[test]
fn paths_mapped_to_an_empty_name_are_skipped() {
    init_logging();
    let mut table = name_only();
    table.insert("Age", [""]);
    let people = vec![Person {
        name: "Ada".to_string(),
        age: 36,
    }];
    let output = relation::marshal(&people, &table).expect("encode");
    assert_eq!(text(output), "full_name\nAda\n");

    let mut decoded: Vec<Person> = Vec::new();
    relation::unmarshal(b"full_name,\nAda,36\n", &mut decoded, &table).expect("decode");
    assert_eq!(decoded[0].age, 0);
}

#[test]
fn records_without_mapped_values_are_dropped_on_encode() {
    init_logging();
    let people = vec![
        Person {
            name: String::new(),
            age: 51,
        },
        Person {
            name: "Ada".to_string(),
            age: 36,
        },
    ];
    let output = relation::marshal(&people, &name_only()).expect("encode");
    assert_eq!(text(output), "full_name\nAda\n");

    let output = relation::marshal_record(&people[0], &name_only()).expect("encode one");
    assert_eq!(text(output), "full_name\n");
}

#[test]
fn decodes_through_renamed_columns() {
    init_logging();
    let input = b"street,full_name,unrelated,years,is_active,region,rating,city\n\
        1 Navy Way,Grace,x,85,false,VA,-3.25,Arlington\n";
    let mut users: Vec<User> = Vec::new();
    relation::unmarshal(input, &mut users, &user_relations()).expect("decode");
    assert_eq!(
        users,
        vec![User {
            name: "Grace".to_string(),
            age: 85,
            active: false,
            score: -3.25,
            address: Address {
                street: "1 Navy Way".to_string(),
                city: "Arlington".to_string(),
                state: "VA".to_string(),
                ..Address::default()
            },
            ..User::default()
        }]
    );
}

#[test]
fn mapped_fields_round_trip() {
    init_logging();
    let users = sample_users();
    let relations = user_relations();
    let encoded = relation::marshal(&users, &relations).expect("encode");
    assert_eq!(
        text(encoded.clone()).lines().next(),
        Some("full_name,years,is_active,rating,street,city,region")
    );

    let mut decoded: Vec<User> = Vec::new();
    relation::unmarshal(&encoded, &mut decoded, &relations).expect("decode");
    let expected: Vec<User> = users
        .into_iter()
        .map(|user| User {
            name: user.name,
            age: user.age,
            active: user.active,
            score: user.score,
            address: Address {
                street: user.address.street,
                city: user.address.city,
                state: user.address.state,
                ..Address::default()
            },
            ..User::default()
        })
        .collect();
    assert_eq!(decoded, expected);
}

#[test]
fn relational_unmarshal_row_checks_bounds_and_decodes_in_place() {
    init_logging();
    let input = b"full_name\nAda\nGrace\n";
    let mut person = Person {
        name: String::new(),
        age: 7,
    };
    relation::unmarshal_row(2, input, &mut person, &name_only()).expect("decode row");
    assert_eq!(person.name, "Grace");
    assert_eq!(person.age, 7);

    let err = relation::unmarshal_row(4, input, &mut person, &name_only()).unwrap_err();
    assert!(matches!(err, Error::InvalidRow { row: 4, rows: 3 }));
    assert_eq!(person.name, "Grace");
}

#[test]
fn decoder_exposes_the_tokenized_header() {
    init_logging();
    let table = name_only();
    let decoder = RelationDecoder::new(b"full_name,extra\nAda,1\n", &table).expect("decoder");
    assert_eq!(decoder.header(), ["full_name", "extra"]);
    assert_eq!(decoder.row_count(), 2);
    assert_eq!(decoder.header_map().get("extra"), Some(1));
    assert_eq!(decoder.relations().len(), 1);
}

#[test]
fn encoder_display_lists_path_to_column_pairs() {
    let encoder = RelationEncoder::new::<User>(&user_relations()).expect("encoder");
    let rendered = encoder.to_string();
    assert!(rendered.starts_with("Header fields:\n"));
    assert!(rendered.contains("\t\"Address State\" >> region\n"));
    assert!(rendered.contains("\t\"Name\" >> full_name\n"));
}

#[test]
fn template_maps_every_path_to_itself() {
    let template = RelationTable::template::<User>().expect("template");
    assert_eq!(template.len(), 7);
    assert_eq!(template.column_name("Address city"), Some("Address city"));

    let output = relation::marshal(&sample_users()[..1], &template).expect("encode");
    assert_eq!(
        text(output).lines().next(),
        Some("Name,Age,Active,Score,Address Street,Address city,Address State")
    );
}
