diesel::table! {
    image_blobs (id) {
        id -> Uuid,
        name -> Text,
        content_type -> Text,
        data -> Bytea,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipes (id) {
        id -> Uuid,
        title -> Text,
        description -> Text,
        ingredients -> Array<Nullable<Text>>,
        instructions -> Text,
        image_url -> Nullable<Text>,
        image_blob_id -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(image_blobs, recipes);
