//! 3D engine (`MAXWELL`).

use super::{EngineTables, BOOL, DEC, F32, HEX, UPLOAD_FIELDS, UPLOAD_METHODS};
use crate::decode::{FieldDecode, FieldFormat, Render};
use crate::enums;
use crate::layout::{MethodDescriptor as M, StructLayout};

pub(super) const REGISTER_COUNT: u32 = 0xE00;
pub(super) const MACRO_REGISTERS_START: u32 = 0xE00;

const RT: StructLayout = StructLayout::new(0x200, 8, 0x10);
const VIEWPORT_TRANSFORM: StructLayout = StructLayout::new(0x280, 16, 8);
const VIEWPORTS: StructLayout = StructLayout::new(0x300, 16, 4);
const VERTEX_ARRAY: StructLayout = StructLayout::new(0x700, 32, 4);
const INDEPENDENT_BLEND: StructLayout = StructLayout::new(0x780, 8, 8);
const VERTEX_ARRAY_LIMIT: StructLayout = StructLayout::new(0x7C0, 32, 2);
const SHADER_CONFIG: StructLayout = StructLayout::new(0x800, 6, 0x10);
const CB_BIND: StructLayout = StructLayout::new(0x900, 5, 8);
const MACROS: StructLayout = StructLayout::new(MACRO_REGISTERS_START, 0x80, 2);

const HEAD: &[M] = &[
    M::array(0x000, 0x44, 1, "unk_0000(INDEX)"),
    M::scalar(0x044, "wait_for_idle"),
    M::scalar(0x045, "macros.upload_address"),
    M::scalar(0x046, "macros.data"),
    M::scalar(0x047, "macros.entry"),
    M::scalar(0x048, "macros.bind"),
    M::array(0x049, 0x7, 1, "unk_0049(INDEX)"),
    M::scalar(0x050, "sync_info.sync_point"),
    M::scalar(0x050, "sync_info.increment"),
    M::array(0x051, 0xF, 1, "unk_0051(INDEX)"),
];

const STATE: &[M] = &[
    RT.field(0x0, "rt(OFFSET).address_high"),
    RT.field(0x1, "rt(OFFSET).address_low"),
    RT.field(0x2, "rt(OFFSET).width"),
    RT.field(0x3, "rt(OFFSET).height"),
    RT.field(0x4, "rt(OFFSET).format"),
    RT.field(0x5, "rt(OFFSET).tile_mode.block_width"),
    RT.field(0x5, "rt(OFFSET).tile_mode.block_height"),
    RT.field(0x5, "rt(OFFSET).tile_mode.block_depth"),
    RT.field(0x5, "rt(OFFSET).tile_mode.is_3d"),
    RT.field(0x6, "rt(OFFSET).depth"),
    RT.field(0x6, "rt(OFFSET).volume"),
    RT.field(0x7, "rt(OFFSET).array_pitch"),
    RT.field(0x8, "rt(OFFSET).base_layer"),
    VIEWPORT_TRANSFORM.field(0x0, "viewport_transform(OFFSET).scale_x"),
    VIEWPORT_TRANSFORM.field(0x1, "viewport_transform(OFFSET).scale_y"),
    VIEWPORT_TRANSFORM.field(0x2, "viewport_transform(OFFSET).scale_z"),
    VIEWPORT_TRANSFORM.field(0x3, "viewport_transform(OFFSET).translate_x"),
    VIEWPORT_TRANSFORM.field(0x4, "viewport_transform(OFFSET).translate_y"),
    VIEWPORT_TRANSFORM.field(0x5, "viewport_transform(OFFSET).translate_z"),
    VIEWPORT_TRANSFORM.field(0x6, "viewport_transform(OFFSET).swizzle.x"),
    VIEWPORT_TRANSFORM.field(0x6, "viewport_transform(OFFSET).swizzle.y"),
    VIEWPORT_TRANSFORM.field(0x6, "viewport_transform(OFFSET).swizzle.z"),
    VIEWPORT_TRANSFORM.field(0x6, "viewport_transform(OFFSET).swizzle.w"),
    VIEWPORT_TRANSFORM.field(0x7, "viewport_transform(OFFSET).snap"),
    VIEWPORTS.field(0x0, "viewports(OFFSET).x"),
    VIEWPORTS.field(0x0, "viewports(OFFSET).width"),
    VIEWPORTS.field(0x1, "viewports(OFFSET).y"),
    VIEWPORTS.field(0x1, "viewports(OFFSET).height"),
    VIEWPORTS.field(0x2, "viewports(OFFSET).depth_range_near"),
    VIEWPORTS.field(0x3, "viewports(OFFSET).depth_range_far"),
    M::scalar(0x35D, "vertex_buffer.first"),
    M::scalar(0x35E, "vertex_buffer.count"),
    M::array(0x360, 4, 1, "clear_color(INDEX)"),
    M::scalar(0x364, "clear_depth"),
    M::scalar(0x368, "clear_stencil"),
    M::scalar(0x36B, "polygon_mode_front"),
    M::scalar(0x36C, "polygon_mode_back"),
    M::scalar(0x3F8, "zeta.address_high"),
    M::scalar(0x3F9, "zeta.address_low"),
    M::scalar(0x3FA, "zeta.format"),
    M::scalar(0x3FB, "zeta.tile_mode"),
    M::scalar(0x3FC, "zeta.layer_stride"),
    M::array(0x458, 32, 1, "vertex_attrib_format(INDEX).buffer"),
    M::array(0x458, 32, 1, "vertex_attrib_format(INDEX).constant"),
    M::array(0x458, 32, 1, "vertex_attrib_format(INDEX).offset"),
    M::array(0x458, 32, 1, "vertex_attrib_format(INDEX).size"),
    M::array(0x458, 32, 1, "vertex_attrib_format(INDEX).type"),
    M::array(0x458, 32, 1, "vertex_attrib_format(INDEX).bgra"),
    M::scalar(0x487, "rt_control.count"),
    M::scalar(0x487, "rt_control.map_0"),
    M::scalar(0x487, "rt_control.map_1"),
    M::scalar(0x487, "rt_control.map_2"),
    M::scalar(0x487, "rt_control.map_3"),
    M::scalar(0x487, "rt_control.map_4"),
    M::scalar(0x487, "rt_control.map_5"),
    M::scalar(0x487, "rt_control.map_6"),
    M::scalar(0x487, "rt_control.map_7"),
    M::scalar(0x48A, "zeta_width"),
    M::scalar(0x48B, "zeta_height"),
    M::scalar(0x48C, "zeta_depth"),
    M::scalar(0x4B3, "depth_test_enable"),
    M::scalar(0x4B9, "independent_blend_enable"),
    M::scalar(0x4BA, "depth_write_enabled"),
    M::scalar(0x4BB, "alpha_test_enabled"),
    M::scalar(0x4C3, "depth_test_func"),
    M::scalar(0x4C4, "alpha_test_ref"),
    M::scalar(0x4C5, "alpha_test_func"),
    M::array(0x4C7, 4, 1, "blend_color(INDEX)"),
    M::scalar(0x4CF, "blend.separate_alpha"),
    M::scalar(0x4D0, "blend.equation_rgb"),
    M::scalar(0x4D1, "blend.factor_source_rgb"),
    M::scalar(0x4D2, "blend.factor_dest_rgb"),
    M::scalar(0x4D3, "blend.equation_a"),
    M::scalar(0x4D4, "blend.factor_source_a"),
    M::scalar(0x4D5, "unk_04D5"),
    M::scalar(0x4D6, "blend.factor_dest_a"),
    M::scalar(0x4D7, "blend.enable_common"),
    M::array(0x4D8, 8, 1, "blend.enable(INDEX)"),
    M::scalar(0x4E0, "stencil_enable"),
    M::scalar(0x4E1, "stencil_front_op_fail"),
    M::scalar(0x4E2, "stencil_front_op_zfail"),
    M::scalar(0x4E3, "stencil_front_op_zpass"),
    M::scalar(0x4E4, "stencil_front_func_func"),
    M::scalar(0x4E5, "stencil_front_func_ref"),
    M::scalar(0x4E6, "stencil_front_func_mask"),
    M::scalar(0x4E7, "stencil_front_mask"),
    M::scalar(0x557, "tex_sampler.address_high"),
    M::scalar(0x558, "tex_sampler.address_low"),
    M::scalar(0x559, "tex_sampler.limit"),
    M::scalar(0x55D, "tex_header.address_high"),
    M::scalar(0x55E, "tex_header.address_low"),
    M::scalar(0x55F, "tex_header.limit"),
    M::scalar(0x585, "draw.vertex_end_gl"),
    M::scalar(0x586, "draw.vertex_begin_gl.topology"),
    M::scalar(0x586, "draw.vertex_begin_gl.instance_next"),
    M::scalar(0x586, "draw.vertex_begin_gl.instance_cont"),
    M::scalar(0x5F2, "index_array.start_addr_high"),
    M::scalar(0x5F3, "index_array.start_addr_low"),
    M::scalar(0x5F4, "index_array.end_addr_high"),
    M::scalar(0x5F5, "index_array.end_addr_low"),
    M::scalar(0x5F6, "index_array.format"),
    M::scalar(0x5F7, "index_array.first"),
    M::scalar(0x5F8, "index_array.count"),
    M::scalar(0x646, "cull_test_enabled"),
    M::scalar(0x647, "front_face"),
    M::scalar(0x648, "cull_face"),
    M::scalar(0x674, "clear_buffers.Z"),
    M::scalar(0x674, "clear_buffers.S"),
    M::scalar(0x674, "clear_buffers.R"),
    M::scalar(0x674, "clear_buffers.G"),
    M::scalar(0x674, "clear_buffers.B"),
    M::scalar(0x674, "clear_buffers.A"),
    M::scalar(0x674, "clear_buffers.RT"),
    M::scalar(0x674, "clear_buffers.layer"),
    M::scalar(0x6C0, "query.address_high"),
    M::scalar(0x6C1, "query.address_low"),
    M::scalar(0x6C2, "query.sequence"),
    M::scalar(0x6C3, "query.query_get.operation"),
    M::scalar(0x6C3, "query.query_get.fence"),
    M::scalar(0x6C3, "query.query_get.unit"),
    M::scalar(0x6C3, "query.query_get.short_query"),
    VERTEX_ARRAY.field(0x0, "vertex_array(OFFSET).stride"),
    VERTEX_ARRAY.field(0x0, "vertex_array(OFFSET).enable"),
    VERTEX_ARRAY.field(0x1, "vertex_array(OFFSET).start_high"),
    VERTEX_ARRAY.field(0x2, "vertex_array(OFFSET).start_low"),
    VERTEX_ARRAY.field(0x3, "vertex_array(OFFSET).divisor"),
    INDEPENDENT_BLEND.field(0x0, "independent_blend(OFFSET).separate_alpha"),
    INDEPENDENT_BLEND.field(0x1, "independent_blend(OFFSET).equation_rgb"),
    INDEPENDENT_BLEND.field(0x2, "independent_blend(OFFSET).factor_source_rgb"),
    INDEPENDENT_BLEND.field(0x3, "independent_blend(OFFSET).factor_dest_rgb"),
    INDEPENDENT_BLEND.field(0x4, "independent_blend(OFFSET).equation_a"),
    INDEPENDENT_BLEND.field(0x5, "independent_blend(OFFSET).factor_source_a"),
    INDEPENDENT_BLEND.field(0x6, "independent_blend(OFFSET).factor_dest_a"),
    VERTEX_ARRAY_LIMIT.field(0x0, "vertex_array_limit(OFFSET).limit_high"),
    VERTEX_ARRAY_LIMIT.field(0x1, "vertex_array_limit(OFFSET).limit_low"),
    SHADER_CONFIG.field(0x0, "shader_config(OFFSET).enable"),
    SHADER_CONFIG.field(0x0, "shader_config(OFFSET).program"),
    SHADER_CONFIG.field(0x1, "shader_config(OFFSET).offset"),
    SHADER_CONFIG.field(0x3, "shader_config(OFFSET).num_registers"),
    M::scalar(0x8E0, "const_buffer.cb_size"),
    M::scalar(0x8E1, "const_buffer.cb_address_high"),
    M::scalar(0x8E2, "const_buffer.cb_address_low"),
    M::scalar(0x8E3, "const_buffer.cb_pos"),
    M::array(0x8E4, 16, 1, "const_buffer.cb_data(INDEX)"),
    CB_BIND.array(0x0, 4, 1, "cb_bind(OFFSET).reserved(INDEX)"),
    CB_BIND.field(0x4, "cb_bind(OFFSET).valid"),
    CB_BIND.field(0x4, "cb_bind(OFFSET).index"),
    M::scalar(0x982, "tex_cb_index"),
    MACROS.field(0x0, "macros(OFFSET).method"),
    MACROS.field(0x1, "macros(OFFSET).param"),
];

const FIELDS: &[FieldDecode] = &[
    FieldDecode::new(0x044, &[HEX]),
    FieldDecode::new(0x045, &[HEX]),
    FieldDecode::new(0x046, &[HEX]),
    FieldDecode::new(0x047, &[HEX]),
    FieldDecode::new(0x048, &[HEX]),
    FieldDecode::new(
        0x050,
        &[FieldFormat::bits(0, 16, Render::Dec), FieldFormat::flag(16)],
    ),
    FieldDecode::new(0x200, &[HEX]),
    FieldDecode::new(0x201, &[HEX]),
    FieldDecode::new(0x202, &[DEC]),
    FieldDecode::new(0x203, &[DEC]),
    FieldDecode::new(
        0x204,
        &const {[FieldFormat::whole(Render::Enum(&enums::RENDER_TARGET_FORMAT))]},
    ),
    FieldDecode::new(
        0x205,
        &[
            FieldFormat::bits(0, 4, Render::Dec),
            FieldFormat::bits(4, 4, Render::Dec),
            FieldFormat::bits(8, 4, Render::Dec),
            FieldFormat::flag(12),
        ],
    ),
    FieldDecode::new(
        0x206,
        &[FieldFormat::bits(0, 16, Render::Dec), FieldFormat::flag(16)],
    ),
    FieldDecode::new(0x207, &[DEC]),
    FieldDecode::new(0x208, &[DEC]),
    FieldDecode::new(0x280, &[F32]),
    FieldDecode::new(0x281, &[F32]),
    FieldDecode::new(0x282, &[F32]),
    FieldDecode::new(0x283, &[F32]),
    FieldDecode::new(0x284, &[F32]),
    FieldDecode::new(0x285, &[F32]),
    FieldDecode::new(
        0x286,
        &const {[
            FieldFormat::bits(0, 3, Render::Enum(&enums::VIEWPORT_SWIZZLE)),
            FieldFormat::bits(4, 3, Render::Enum(&enums::VIEWPORT_SWIZZLE)),
            FieldFormat::bits(8, 3, Render::Enum(&enums::VIEWPORT_SWIZZLE)),
            FieldFormat::bits(12, 3, Render::Enum(&enums::VIEWPORT_SWIZZLE)),
        ]},
    ),
    FieldDecode::new(
        0x300,
        &[
            FieldFormat::bits(0, 16, Render::Dec),
            FieldFormat::bits(16, 16, Render::Dec),
        ],
    ),
    FieldDecode::new(
        0x301,
        &[
            FieldFormat::bits(0, 16, Render::Dec),
            FieldFormat::bits(16, 16, Render::Dec),
        ],
    ),
    FieldDecode::new(0x302, &[F32]),
    FieldDecode::new(0x303, &[F32]),
    FieldDecode::new(0x35D, &[DEC]),
    FieldDecode::new(0x35E, &[DEC]),
    FieldDecode::new(0x360, &[F32]),
    FieldDecode::new(0x364, &[F32]),
    FieldDecode::new(0x368, &[DEC]),
    FieldDecode::new(
        0x36B,
        &const {[FieldFormat::whole(Render::Enum(&enums::POLYGON_MODE))]},
    ),
    FieldDecode::new(
        0x36C,
        &const {[FieldFormat::whole(Render::Enum(&enums::POLYGON_MODE))]},
    ),
    FieldDecode::new(0x3F8, &[HEX]),
    FieldDecode::new(0x3F9, &[HEX]),
    FieldDecode::new(
        0x3FA,
        &const {[FieldFormat::whole(Render::Enum(&enums::DEPTH_FORMAT))]},
    ),
    FieldDecode::new(0x3FC, &[HEX]),
    FieldDecode::new(
        0x458,
        &const {[
            FieldFormat::bits(0, 5, Render::Dec),
            FieldFormat::flag(6),
            FieldFormat::bits(7, 14, Render::Dec),
            FieldFormat::bits(21, 6, Render::Enum(&enums::VERTEX_ATTRIBUTE_SIZE)),
            FieldFormat::bits(27, 3, Render::Enum(&enums::VERTEX_ATTRIBUTE_TYPE)),
            FieldFormat::flag(31),
        ]},
    ),
    FieldDecode::new(
        0x487,
        &[
            FieldFormat::bits(0, 4, Render::Dec),
            FieldFormat::bits(4, 3, Render::Dec),
            FieldFormat::bits(7, 3, Render::Dec),
            FieldFormat::bits(10, 3, Render::Dec),
            FieldFormat::bits(13, 3, Render::Dec),
            FieldFormat::bits(16, 3, Render::Dec),
            FieldFormat::bits(19, 3, Render::Dec),
            FieldFormat::bits(22, 3, Render::Dec),
            FieldFormat::bits(25, 3, Render::Dec),
        ],
    ),
    FieldDecode::new(0x48A, &[DEC]),
    FieldDecode::new(0x48B, &[DEC]),
    FieldDecode::new(0x48C, &[DEC]),
    FieldDecode::new(0x4B3, &[BOOL]),
    FieldDecode::new(0x4B9, &[BOOL]),
    FieldDecode::new(0x4BA, &[BOOL]),
    FieldDecode::new(0x4BB, &[BOOL]),
    FieldDecode::new(
        0x4C3,
        &const {[FieldFormat::whole(Render::Enum(&enums::COMPARISON_OP))]},
    ),
    FieldDecode::new(0x4C4, &[F32]),
    FieldDecode::new(
        0x4C5,
        &const {[FieldFormat::whole(Render::Enum(&enums::COMPARISON_OP))]},
    ),
    FieldDecode::new(0x4C7, &[F32]),
    FieldDecode::new(0x4CF, &[BOOL]),
    FieldDecode::new(
        0x4D0,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_EQUATION))]},
    ),
    FieldDecode::new(
        0x4D1,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_FACTOR))]},
    ),
    FieldDecode::new(
        0x4D2,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_FACTOR))]},
    ),
    FieldDecode::new(
        0x4D3,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_EQUATION))]},
    ),
    FieldDecode::new(
        0x4D4,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_FACTOR))]},
    ),
    FieldDecode::new(
        0x4D6,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_FACTOR))]},
    ),
    FieldDecode::new(0x4D7, &[BOOL]),
    FieldDecode::new(0x4D8, &[BOOL]),
    FieldDecode::new(0x4E0, &[BOOL]),
    FieldDecode::new(
        0x4E1,
        &const {[FieldFormat::whole(Render::Enum(&enums::STENCIL_OP))]},
    ),
    FieldDecode::new(
        0x4E2,
        &const {[FieldFormat::whole(Render::Enum(&enums::STENCIL_OP))]},
    ),
    FieldDecode::new(
        0x4E3,
        &const {[FieldFormat::whole(Render::Enum(&enums::STENCIL_OP))]},
    ),
    FieldDecode::new(
        0x4E4,
        &const {[FieldFormat::whole(Render::Enum(&enums::COMPARISON_OP))]},
    ),
    FieldDecode::new(0x4E5, &[DEC]),
    FieldDecode::new(0x4E6, &[HEX]),
    FieldDecode::new(0x4E7, &[HEX]),
    FieldDecode::new(0x557, &[HEX]),
    FieldDecode::new(0x558, &[HEX]),
    FieldDecode::new(0x559, &[DEC]),
    FieldDecode::new(0x55D, &[HEX]),
    FieldDecode::new(0x55E, &[HEX]),
    FieldDecode::new(0x55F, &[DEC]),
    FieldDecode::new(
        0x586,
        &const {[
            FieldFormat::bits(0, 16, Render::Enum(&enums::PRIMITIVE_TOPOLOGY)),
            FieldFormat::flag(26),
            FieldFormat::flag(27),
        ]},
    ),
    FieldDecode::new(0x5F2, &[HEX]),
    FieldDecode::new(0x5F3, &[HEX]),
    FieldDecode::new(0x5F4, &[HEX]),
    FieldDecode::new(0x5F5, &[HEX]),
    FieldDecode::new(
        0x5F6,
        &const {[FieldFormat::whole(Render::Enum(&enums::INDEX_FORMAT))]},
    ),
    FieldDecode::new(0x5F7, &[DEC]),
    FieldDecode::new(0x5F8, &[DEC]),
    FieldDecode::new(0x646, &[BOOL]),
    FieldDecode::new(
        0x647,
        &const {[FieldFormat::whole(Render::Enum(&enums::FRONT_FACE))]},
    ),
    FieldDecode::new(
        0x648,
        &const {[FieldFormat::whole(Render::Enum(&enums::CULL_FACE))]},
    ),
    FieldDecode::new(
        0x674,
        &[
            FieldFormat::flag(0),
            FieldFormat::flag(1),
            FieldFormat::flag(2),
            FieldFormat::flag(3),
            FieldFormat::flag(4),
            FieldFormat::flag(5),
            FieldFormat::bits(6, 4, Render::Dec),
            FieldFormat::bits(10, 11, Render::Dec),
        ],
    ),
    FieldDecode::new(0x6C0, &[HEX]),
    FieldDecode::new(0x6C1, &[HEX]),
    FieldDecode::new(0x6C2, &[HEX]),
    FieldDecode::new(
        0x6C3,
        &const {[
            FieldFormat::bits(0, 2, Render::Enum(&enums::QUERY_OPERATION)),
            FieldFormat::flag(4),
            FieldFormat::bits(12, 4, Render::Dec),
            FieldFormat::flag(28),
        ]},
    ),
    FieldDecode::new(
        0x700,
        &[FieldFormat::bits(0, 12, Render::Dec), FieldFormat::flag(12)],
    ),
    FieldDecode::new(0x701, &[HEX]),
    FieldDecode::new(0x702, &[HEX]),
    FieldDecode::new(0x703, &[DEC]),
    FieldDecode::new(0x780, &[BOOL]),
    FieldDecode::new(
        0x781,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_EQUATION))]},
    ),
    FieldDecode::new(
        0x782,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_FACTOR))]},
    ),
    FieldDecode::new(
        0x783,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_FACTOR))]},
    ),
    FieldDecode::new(
        0x784,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_EQUATION))]},
    ),
    FieldDecode::new(
        0x785,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_FACTOR))]},
    ),
    FieldDecode::new(
        0x786,
        &const {[FieldFormat::whole(Render::Enum(&enums::BLEND_FACTOR))]},
    ),
    FieldDecode::new(0x7C0, &[HEX]),
    FieldDecode::new(0x7C1, &[HEX]),
    FieldDecode::new(
        0x800,
        &const {[
            FieldFormat::flag(0),
            FieldFormat::bits(4, 4, Render::Enum(&enums::SHADER_PROGRAM)),
        ]},
    ),
    FieldDecode::new(0x801, &[HEX]),
    FieldDecode::new(0x803, &[DEC]),
    FieldDecode::new(0x8E0, &[DEC]),
    FieldDecode::new(0x8E1, &[HEX]),
    FieldDecode::new(0x8E2, &[HEX]),
    FieldDecode::new(0x8E3, &[HEX]),
    FieldDecode::new(
        0x904,
        &[FieldFormat::flag(0), FieldFormat::bits(4, 5, Render::Dec)],
    ),
    FieldDecode::new(0x982, &[DEC]),
];

pub(super) static TABLES: EngineTables = EngineTables {
    methods: &[HEAD, UPLOAD_METHODS, STATE],
    fields: &[UPLOAD_FIELDS, FIELDS],
    register_count: REGISTER_COUNT,
    macro_start: Some(MACRO_REGISTERS_START),
};
