pub mod audio {
    pub mod domain {
        pub mod audio_artifact;
        pub mod audio_reader;
        pub mod audio_segment;
        pub mod audio_writer;
        pub mod filter_error;
        pub mod filter_plan;
        pub mod filter_request;
        pub mod transform_executor;
    }
    pub mod infrastructure;
}

pub mod synthesis {
    pub mod domain {
        pub mod speech_synthesizer;
        pub mod synthesis_error;
        pub mod voice_store;
    }
    pub mod infrastructure;
}

pub mod text {
    pub mod domain {
        pub mod pronunciation_vocabulary;
        pub mod text_tools;
    }
}

pub mod pipeline {
    pub mod apply_filters_use_case;
    pub mod pipeline_logger;
    pub mod studio_session;
    pub mod synthesize_base_use_case;
    pub mod temp_workspace;
}

pub mod shared {
    pub mod config;
    pub mod constants;
}
