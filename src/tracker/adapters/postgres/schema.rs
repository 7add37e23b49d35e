//! Diesel schema for tracker persistence.

diesel::table! {
    /// Job positions.
    positions (id) {
        /// Position identifier.
        id -> Uuid,
        /// Unique position name.
        #[max_length = 100]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
    }
}

diesel::table! {
    /// Worker accounts.
    workers (id) {
        /// Worker identifier.
        id -> Uuid,
        /// Unique login handle.
        #[max_length = 150]
        username -> Varchar,
        /// Given name.
        first_name -> Text,
        /// Family name.
        last_name -> Text,
        /// Derived `"last first"` name, stored for display and search.
        full_name -> Text,
        /// Optional job position.
        position_id -> Nullable<Uuid>,
        /// Free-form biography.
        biography -> Text,
    }
}

diesel::table! {
    /// Teams of workers.
    teams (id) {
        /// Team identifier.
        id -> Uuid,
        /// Unique team name.
        #[max_length = 100]
        name -> Varchar,
        /// Optional team leader.
        leader_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Team membership links.
    team_members (team_id, worker_id) {
        /// Team identifier.
        team_id -> Uuid,
        /// Member worker identifier.
        worker_id -> Uuid,
    }
}

diesel::table! {
    /// Projects.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Unique project name.
        #[max_length = 100]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Optional project leader.
        leader_id -> Nullable<Uuid>,
        /// Optional delivering team.
        team_id -> Nullable<Uuid>,
        /// Deadline date.
        deadline -> Date,
        /// Completion flag.
        is_completed -> Bool,
    }
}

diesel::table! {
    /// Task categories.
    task_types (id) {
        /// Task type identifier.
        id -> Uuid,
        /// Unique task type name.
        #[max_length = 100]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
    }
}

diesel::table! {
    /// Tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task name, unique per project.
        #[max_length = 100]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Deadline timestamp.
        deadline -> Timestamptz,
        /// Completion flag.
        is_completed -> Bool,
        /// Priority label.
        #[max_length = 10]
        priority -> Varchar,
        /// Task category.
        task_type_id -> Uuid,
        /// Optional owning project.
        project_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Task assignment links.
    task_assignees (task_id, worker_id) {
        /// Task identifier.
        task_id -> Uuid,
        /// Assigned worker identifier.
        worker_id -> Uuid,
    }
}

diesel::joinable!(workers -> positions (position_id));
diesel::joinable!(team_members -> teams (team_id));
diesel::joinable!(team_members -> workers (worker_id));
diesel::joinable!(projects -> teams (team_id));
diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(tasks -> task_types (task_type_id));
diesel::joinable!(task_assignees -> tasks (task_id));
diesel::joinable!(task_assignees -> workers (worker_id));

diesel::allow_tables_to_appear_in_same_query!(
    positions,
    workers,
    teams,
    team_members,
    projects,
    task_types,
    tasks,
    task_assignees,
);
