table! {
    categories (id) {
        id -> Int4,
        name -> Varchar,
    }
}

table! {
    field_configs (id) {
        id -> Int4,
        inventory_id -> Int4,
        slot -> Varchar,
        title -> Varchar,
        description -> Varchar,
        field_type -> Varchar,
        visible_in_table -> Bool,
        position -> Int4,
    }
}

table! {
    inventories (id) {
        id -> Int4,
        title -> Varchar,
        description -> Text,
        image_url -> Nullable<Varchar>,
        owner_id -> Int4,
        is_public -> Bool,
        category -> Nullable<Varchar>,
        custom_id_format -> Nullable<Jsonb>,
        version -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    inventory_tags (inventory_id, tag_id) {
        inventory_id -> Int4,
        tag_id -> Int4,
    }
}

table! {
    inventory_users (inventory_id, user_id) {
        inventory_id -> Int4,
        user_id -> Int4,
    }
}

table! {
    items (id) {
        id -> Int4,
        inventory_id -> Int4,
        custom_id -> Varchar,
        created_by -> Int4,
        created_at -> Timestamp,
        text1 -> Nullable<Varchar>,
        text2 -> Nullable<Varchar>,
        text3 -> Nullable<Varchar>,
        multiline1 -> Nullable<Text>,
        multiline2 -> Nullable<Text>,
        multiline3 -> Nullable<Text>,
        number1 -> Nullable<Float8>,
        number2 -> Nullable<Float8>,
        number3 -> Nullable<Float8>,
        link1 -> Nullable<Varchar>,
        link2 -> Nullable<Varchar>,
        link3 -> Nullable<Varchar>,
        boolean1 -> Nullable<Bool>,
        boolean2 -> Nullable<Bool>,
        boolean3 -> Nullable<Bool>,
    }
}

table! {
    tags (id) {
        id -> Int4,
        name -> Varchar,
    }
}

table! {
    users (id) {
        id -> Int4,
        sub -> Varchar,
        username -> Varchar,
        email -> Varchar,
        status -> Varchar,
        role -> Varchar,
    }
}

joinable!(field_configs -> inventories (inventory_id));
joinable!(inventories -> users (owner_id));
joinable!(inventory_tags -> inventories (inventory_id));
joinable!(inventory_tags -> tags (tag_id));
joinable!(inventory_users -> inventories (inventory_id));
joinable!(inventory_users -> users (user_id));
joinable!(items -> inventories (inventory_id));

allow_tables_to_appear_in_same_query!(
    categories,
    field_configs,
    inventories,
    inventory_tags,
    inventory_users,
    items,
    tags,
    users,
);
