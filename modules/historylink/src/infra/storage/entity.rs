//! SeaORM entities for database tables

/// Historical record table entity
pub mod record {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "record")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub title: String,

        pub description: String,

        pub location: Option<String>,

        pub significance: Option<String>,

        pub url: String,

        /// Minute precision, no time zone
        pub start_date: Option<DateTime>,

        pub end_date: Option<DateTime>,

        /// RecordType discriminant (0..=3)
        pub r#type: i16,

        /// RecordStatus discriminant (0..=3)
        pub status: i16,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-many relationship with impacts
        #[sea_orm(has_many = "super::impact::Entity")]
        Impact,
    }

    impl Related<super::impact::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Impact.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Impact table entity
pub mod impact {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "impact")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub record_id: Uuid,

        pub description: String,

        pub value: i16,

        pub category: i16,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::record::Entity",
            from = "Column::RecordId",
            to = "super::record::Column::Id",
            on_delete = "Cascade"
        )]
        Record,
    }

    impl Related<super::record::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Record.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Link table entity
pub mod link {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "link")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Record the link was created from
        pub record_id: Uuid,

        /// Record the link points at
        pub record_id2: Uuid,

        pub strength: i16,

        /// Smaller of the two record ids; with `pair_high` keys the unordered pair
        pub pair_low: Uuid,

        pub pair_high: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::record::Entity",
            from = "Column::RecordId",
            to = "super::record::Column::Id",
            on_delete = "Cascade"
        )]
        Source,
        #[sea_orm(
            belongs_to = "super::record::Entity",
            from = "Column::RecordId2",
            to = "super::record::Column::Id",
            on_delete = "Cascade"
        )]
        Target,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Impact history table entity. No foreign keys: rows outlive what they describe.
pub mod impact_history {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "impact_history")]
    pub struct Model {
        /// Insertion order; breaks ties between entries of one change set
        #[sea_orm(primary_key)]
        pub seq: i64,

        #[sea_orm(unique)]
        pub id: Uuid,

        pub impact_id: Option<Uuid>,

        pub record_id: Option<Uuid>,

        pub description: String,

        pub value: i16,

        pub category: i16,

        /// created | updated | deleted
        pub change: String,

        pub changed_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
