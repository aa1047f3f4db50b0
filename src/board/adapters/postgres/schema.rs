//! Diesel schema for board aggregate persistence.

diesel::table! {
    /// Board records.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Board display name.
        #[max_length = 100]
        name -> Varchar,
        /// Unique-per-active-board short name.
        #[max_length = 10]
        short_name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-delete tombstone.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Column records, ordered per board.
    columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Owning board.
        board_id -> Uuid,
        /// Column display name.
        #[max_length = 100]
        name -> Varchar,
        /// Dense per-board order.
        order_num -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-delete tombstone.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Task records with embedded checklists.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning board.
        board_id -> Uuid,
        /// Owning column.
        column_id -> Uuid,
        /// Dense per-board task number.
        number -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Display-ordered tags.
        tags -> Array<Text>,
        /// Checklists as one structured blob.
        checklists -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-delete tombstone.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(columns -> boards (board_id));
diesel::joinable!(tasks -> boards (board_id));
diesel::joinable!(tasks -> columns (column_id));

diesel::allow_tables_to_appear_in_same_query!(boards, columns, tasks);
